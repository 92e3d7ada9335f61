//! API session
//!
//! [`ApiSession`] is the single entry point for callers. Every operation
//! follows the same path: merge the optional site or serial override into
//! the parameter store, build the URL, issue one GET, decode the body with
//! the endpoint's response schema and unwrap the envelope.
//!
//! Transport failures are returned untouched. There are no retries and no
//! caching beyond the site and inventory snapshot taken at construction.

mod client;

pub use client::{ApiSession, SITE_FIELD};
