//! CLI commands and argument parsing

use crate::catalog::TimeUnit;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SolarEdge monitoring data collector
#[derive(Parser, Debug)]
#[command(name = "solaredge-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (overrides config file and environment)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format for rows
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sites of the account
    Sites,

    /// Show the inventory of every site
    Inventory,

    /// Show the current and supported API versions
    Versions,

    /// Energy samples as sink rows
    Energy {
        /// First day, in days before today
        #[arg(long, default_value = "1")]
        from: u64,

        /// Last day, in days before today
        #[arg(long, default_value = "0")]
        to: u64,

        /// Aggregation granularity
        #[arg(long, default_value = "HOUR")]
        unit: TimeUnit,

        /// Site id (default: every site)
        #[arg(long)]
        site: Option<String>,

        /// Measurement name (default: derived from the unit)
        #[arg(long)]
        measurement: Option<String>,
    },

    /// Inverter telemetry as sink rows
    Telemetry {
        /// First day, in days before today
        #[arg(long, default_value = "1")]
        from: u64,

        /// Last day, in days before today
        #[arg(long, default_value = "0")]
        to: u64,

        /// Inverter serial number (default: first inverter found)
        #[arg(long)]
        serial: Option<String>,
    },

    /// Call one endpoint and print the decoded response
    Call {
        /// Endpoint id (see `endpoints`)
        endpoint: String,

        /// Site id
        #[arg(long)]
        site: Option<String>,

        /// Inverter serial number
        #[arg(long)]
        serial: Option<String>,
    },

    /// List the known endpoints
    Endpoints,
}

/// Row output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one row per line)
    Json,
    /// InfluxDB line protocol
    Line,
}
