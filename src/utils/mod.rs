//! Shared helpers for settings files and settings values.

pub mod fs;
pub mod value;
