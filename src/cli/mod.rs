//! CLI module
//!
//! Command-line interface over the blob store.
//!
//! # Commands
//!
//! - `put` - Upload a file as a blob
//! - `list` - List every blob in the container
//! - `get` - Download a blob
//! - `delete` - Delete a blob
//! - `cleanup` - Delete the whole container
//! - `shell` - Interactive command loop

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
