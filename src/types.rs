//! Common types used throughout the crate
//!
//! Type aliases and small utilities shared across modules.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for optional text coming from flags, files and the
/// environment
pub trait OptionStringExt {
    /// Trimmed text, or `None` if it is empty or only whitespace
    fn none_if_blank(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_blank(self) -> Option<String> {
        self.and_then(OptionStringExt::none_if_blank)
    }
}

impl OptionStringExt for String {
    fn none_if_blank(self) -> Option<String> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == self.len() {
            Some(self)
        } else {
            Some(trimmed.to_string())
        }
    }
}
