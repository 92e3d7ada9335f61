//! Schema descriptor module
//!
//! Declarative description of record shapes, enums and REST endpoints.
//!
//! # Overview
//!
//! - **Type tags**: primitive, enum, nested record, sequence, mapping, temporal
//! - **Field presence**: required, optional, or defaulted on null/absent
//! - **Endpoints**: URL template, path arguments, query parameters, response schema, envelope
//! - **Registry**: validated, read-only lookup over the whole catalogue

mod endpoint;
mod registry;
mod types;

pub use endpoint::{Arg, EndpointDescriptor, Param};
pub use registry::Registry;
pub use types::{
    DefaultValue, EnumDescriptor, EnumVariant, FieldDescriptor, Literal, Presence, PrimitiveKind,
    SchemaDescriptor, TypeTag,
};
