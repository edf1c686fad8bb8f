//! Search domain - turns raw search text into effective queries

pub mod debouncer;

use std::time::Duration;

pub use self::debouncer::SearchDebouncer;

/// Quiet period after the last keystroke before a query takes effect.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
