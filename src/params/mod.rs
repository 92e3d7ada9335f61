//! Parameter store and argument builder
//!
//! The [`ParameterStore`] holds the values an [`ApiSession`](crate::session::ApiSession)
//! reuses across calls: the API key, the current site and inverter, date
//! ranges and filters. The [`ArgumentBuilder`] reads it to turn an endpoint
//! descriptor into a concrete URL.

mod builder;
mod store;

pub use builder::{redact, ArgumentBuilder, Request};
pub use store::{ParameterStore, DATETIME_FORMAT, DATE_FORMAT};
