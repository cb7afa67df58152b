//! Core types shared by every layer of recently
//!
//! - [`RecentlyError`] - typed host-side failures
//! - [`ErrorContext`] - user-facing wrapper with suggestions
//! - [`user_friendly_error`] - conversion used by the CLI entry point
//!
//! Cancellation is not represented here: a dismissed picker
//! is an `Ok(None)`, never an error.

pub mod error;

pub use error::{ErrorContext, RecentlyError, user_friendly_error};
