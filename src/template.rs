//! URL template interpolation
//!
//! Handles the `{name}` placeholders of endpoint URL templates, e.g.
//! `site/{siteid}/energy` or `equipment/{siteid}/{serialnumber}/data`.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex for matching placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Render a template, looking each placeholder up with `lookup`
///
/// Every undefined placeholder is reported in one error.
pub fn render<'a, F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut missing = Vec::new();
    let rendered = PLACEHOLDER_REGEX.replace_all(template, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match lookup(name) {
            Some(value) => value.to_string(),
            None => {
                missing.push(name.to_string());
                String::new()
            }
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::Other(format!(
            "Undefined placeholder in '{template}': {}",
            missing.join(", ")
        )))
    }
}

/// Extract all placeholder names from a template, in order of appearance
pub fn extract_placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect()
}
