// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # SolarEdge ETL
//!
//! Typed bindings for the SolarEdge monitoring REST API, plus the pieces
//! needed to move its data into a time-series store.
//!
//! ## Features
//!
//! - **Static Catalogue**: Every endpoint, record schema and vendor enum declared once and validated
//! - **Schema-Driven Decoding**: Raw JSON becomes typed records with explicit presence rules
//! - **Request Building**: URLs assembled from templates, path arguments and set query parameters
//! - **Sessions**: Site and inverter discovery, then one method per endpoint
//! - **Sink Rows**: Energy and telemetry records as JSON lines or InfluxDB line protocol
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solaredge_etl::{ApiSession, ClientConfig, Result};
//! use solaredge_etl::catalog::TimeUnit;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::load(None)?;
//!     let mut session = ApiSession::connect(&config).await?;
//!
//!     session.set_dates(7, 0);
//!     session.set_time_unit(TimeUnit::Day);
//!     let energy = session.energy(None).await?;
//!     for sample in energy.records("values") {
//!         println!("{:?} {:?}", sample.datetime("date"), sample.float("value"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          ApiSession                             │
//! │  discover() → sites, inventories    energy() / power() / ...    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬──────────────────┼──────────────┬───────────────────┐
//! │  Catalog  │     Params       │     HTTP     │      Decode       │
//! ├───────────┼──────────────────┼──────────────┼───────────────────┤
//! │ Endpoints │ ParameterStore   │ Transport    │ Decoder           │
//! │ Schemas   │ ArgumentBuilder  │ reqwest      │ DecodeReport      │
//! │ Enums     │ URL redaction    │ Timeouts     │ Temporal parsing  │
//! └───────────┴──────────────────┴──────────────┴───────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Date, time and datetime values as the API writes them
pub mod temporal;

/// URL template placeholders
pub mod template;

/// Descriptor types and the validated registry
pub mod schema;

/// Schema-driven JSON decoding
pub mod decode;

/// Query parameters and request URLs
pub mod params;

/// The SolarEdge catalogue: enums, schemas and endpoints
pub mod catalog;

/// HTTP transport
pub mod http;

/// Client configuration
pub mod config;

/// API sessions
pub mod session;

/// Time-series rows and writers
pub mod sink;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::registry;
pub use config::ClientConfig;
pub use decode::{Decoded, Record, TypedValue};
pub use session::ApiSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
