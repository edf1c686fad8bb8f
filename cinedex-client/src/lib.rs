//! cinedex client library
//!
//! The view-model layer of the movie catalog client: it turns typed search
//! text into throttled catalog requests, exposes list and detail loads as
//! explicit state machines, and falls back to the offline cache when a live
//! list fetch fails.
//!
//! Notes
//! - State machines must be created inside a Tokio runtime; they spawn their
//!   debounce and request tasks on it.
//! - Observers are invoked synchronously after each committed transition and
//!   must not mutate the machine they observe.

pub mod config;
pub mod domains;
pub mod state;

pub use config::{ClientConfig, ConfigError};
pub use domains::detail::{DetailState, MovieDetailModel};
pub use domains::list::{ListState, MovieListModel};
pub use domains::search::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use state::{Observable, SubscriptionId};
