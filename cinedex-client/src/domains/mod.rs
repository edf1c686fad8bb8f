//! View-model domains: search input, list loading and detail loading.

pub mod detail;
pub mod list;
pub mod search;
