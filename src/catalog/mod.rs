//! SolarEdge monitoring API catalogue
//!
//! Static declarations of every enum, record schema and endpoint the client
//! knows about. [`registry`] validates them once, on first use.

mod endpoints;
mod enums;
mod schemas;

pub use endpoints::ENDPOINTS;
pub use enums::{
    InverterMode, MeterType, SiteStatus, SortOrder, SortProperty, SystemUnits, TimeUnit, Unit,
    ENUMS, OPERATION_MODE,
};
pub use schemas::SCHEMAS;

use crate::error::{Error, Result};
use crate::schema::Registry;
use std::sync::LazyLock;

static REGISTRY: LazyLock<std::result::Result<Registry, String>> =
    LazyLock::new(|| {
        Registry::new(SCHEMAS, ENUMS, ENDPOINTS).map_err(|e| match e {
            Error::InvalidCatalog { message } => message,
            other => other.to_string(),
        })
    });

/// The validated catalogue registry
///
/// Fails when the static declarations are inconsistent (dangling reference,
/// recursive schema, template and argument mismatch).
pub fn registry() -> Result<&'static Registry> {
    REGISTRY
        .as_ref()
        .map_err(|message| Error::invalid_catalog(message.clone()))
}
