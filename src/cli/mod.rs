//! CLI module
//!
//! Command-line interface over the user directory.
//!
//! # Commands
//!
//! - `users` - Stream users to stdout until the listing ends, fails or Ctrl-C
//! - `validate` - Load and validate the configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, DEFAULT_CONFIG_FILE};
pub use runner::{consume, Runner};
