//! CLI module
//!
//! Command-line interface over the resource clients.
//!
//! # Commands
//!
//! - `projects` - list/show/create/update/delete projects
//! - `tokens` - permanent API tokens
//! - `quotas` - quotas and increase requests
//! - `capacity` - free bare-metal nodes
//! - `flavors`, `registries` - inference flavors and registry credentials
//! - `heat` - orchestration stack resources
//! - `users` - role assignments
//! - `tasks` - show or wait on background tasks

mod commands;
mod display;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use display::{format_table, Tabular};
pub use runner::Runner;
