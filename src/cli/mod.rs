//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `seed` - Rebuild the reference dataset

pub mod args;

pub use args::{Cli, Commands};
