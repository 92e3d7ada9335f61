//! Generic response decoder
//!
//! # Overview
//!
//! Turns an untyped JSON value into a [`Record`] graph using only the field
//! types declared in a [`SchemaDescriptor`](crate::schema::SchemaDescriptor).
//! No endpoint-specific parsing code exists; every response goes through
//! [`Decoder::decode`].
//!
//! Coercion rules:
//!
//! - **Primitives** pass through when the JSON kind matches, otherwise fail
//! - **Temporals** are parsed from strings, failures are fatal
//! - **Enums** match by variant name, then by literal value, then fall back
//!   to [`EnumValue::Unknown`]
//! - **Records** recurse; a missing required record is fatal
//! - **Sequences** keep order and length
//! - **Mappings** decode values; enum keys are matched by variant name

mod decoder;
mod types;

pub use decoder::Decoder;
pub use types::{DecodeReport, Decoded, EnumValue, MapKey, Record, TypedValue, UnknownEnum};

#[cfg(test)]
mod tests;
