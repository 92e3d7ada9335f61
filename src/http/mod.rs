//! HTTP transport module
//!
//! The [`Transport`] trait is the seam between the session and the network.
//! [`HttpTransport`] implements it with a single pooled reqwest client.
//!
//! # Behaviour
//!
//! - **Single attempt**: no retries or rate limiting
//! - **Fixed timeout**: 60 seconds unless configured otherwise
//! - **Error mapping**: non-2xx to `HttpStatus`, timeouts to `Timeout`

mod client;

pub use client::{
    default_user_agent, HttpClientConfig, HttpClientConfigBuilder, HttpTransport, Transport,
    DEFAULT_TIMEOUT,
};
