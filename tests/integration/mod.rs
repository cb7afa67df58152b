//! Integration test suite for recently
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **arguments**: end-to-end activations through the library with a
//!   scripted UI and a recording invoker
//! - **cli**: the `recently` binary, for everything that needs no terminal

#[path = "../common/mod.rs"]
mod common;

mod arguments;
mod cli;
