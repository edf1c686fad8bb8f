//! Detail domain - a single movie record per session

pub mod model;
pub mod types;

pub use self::model::MovieDetailModel;
pub use self::types::DetailState;
