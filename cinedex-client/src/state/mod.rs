//! Observable state container shared by the view models.

pub mod observable;

pub use observable::{Observable, SubscriptionId};
