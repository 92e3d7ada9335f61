//! Error types for the SolarEdge bindings
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Unknown enum values and unexpected JSON keys are not errors:
//! the decoder records them in a [`DecodeReport`](crate::decode::DecodeReport)
//! and keeps going.

use thiserror::Error;

/// The main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("No API key configured")]
    MissingCredential,

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Catalogue Errors
    // ============================================================================
    #[error("Invalid catalogue: {message}")]
    InvalidCatalog { message: String },

    #[error("Unknown endpoint: {endpoint}")]
    UnknownEndpoint { endpoint: String },

    // ============================================================================
    // Request Building Errors
    // ============================================================================
    #[error("Missing argument '{argument}' for endpoint '{endpoint}'")]
    MissingArgument { endpoint: String, argument: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Session is closed")]
    SessionClosed,

    // ============================================================================
    // Decoding Errors
    // ============================================================================
    #[error("Failed to decode '{path}': {message}")]
    Decode { path: String, message: String },

    #[error("Cannot parse '{input}' as {kind}")]
    Temporal { input: String, kind: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a catalogue validation error
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(endpoint: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            endpoint: endpoint.into(),
            argument: argument.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error at a JSON path
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a temporal parse error
    pub fn temporal(input: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Temporal {
            input: input.into(),
            kind: kind.into(),
        }
    }

    /// Whether this error came from the network layer (never retried)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }

    /// Whether this error came from turning a response body into records
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Temporal { .. })
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_argument("site_energy", "siteid");
        assert_eq!(
            err.to_string(),
            "Missing argument 'siteid' for endpoint 'site_energy'"
        );

        let err = Error::http_status(500, "boom");
        assert_eq!(err.to_string(), "HTTP 500: boom");

        let err = Error::decode("energy.values[0].value", "expected float, found string");
        assert_eq!(
            err.to_string(),
            "Failed to decode 'energy.values[0].value': expected float, found string"
        );
    }

    #[test]
    fn test_is_transport() {
        assert!(Error::http_status(500, "").is_transport());
        assert!(Error::http_status(404, "").is_transport());
        assert!(Error::Timeout { timeout_ms: 60_000 }.is_transport());

        assert!(!Error::MissingCredential.is_transport());
        assert!(!Error::missing_argument("e", "a").is_transport());
        assert!(!Error::decode("p", "m").is_transport());
        assert!(!Error::SessionClosed.is_transport());
    }

    #[test]
    fn test_is_decode() {
        assert!(Error::decode("p", "m").is_decode());
        assert!(Error::temporal("yesterday", "date").is_decode());
        assert!(!Error::config("x").is_decode());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
