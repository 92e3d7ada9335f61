//! Time-series sink rows
//!
//! Decoded records become [`Row`]s of (measurement, minute timestamp, tags,
//! fields), written as JSON lines or InfluxDB line protocol.

mod rows;
mod types;
mod writer;

pub use rows::{energy_rows, telemetry_rows, SITE_TAG, TELEMETRY_MEASUREMENT};
pub use types::{FieldValue, Row, TIME_FORMAT};
pub use writer::{to_line, JsonLinesSink, LineProtocolSink, Sink};

#[cfg(test)]
mod tests;
