//! List domain - popular listing and search results with offline fallback

pub mod model;
pub mod types;

pub use self::model::MovieListModel;
pub use self::types::ListState;
