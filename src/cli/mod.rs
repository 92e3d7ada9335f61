//! CLI module
//!
//! Command-line interface over the API session.
//!
//! # Commands
//!
//! - `sites` / `inventory` / `versions` - Account information as JSON
//! - `energy` - Energy samples as sink rows
//! - `telemetry` - Inverter telemetry as sink rows
//! - `call` - Any endpoint, decoded
//! - `endpoints` - Catalogue listing, no network

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;

#[cfg(test)]
mod tests;
