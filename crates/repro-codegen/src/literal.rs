//! Python data literals from JSON values.
//!
//! The situation is pretty-printed as JSON with two-space indentation and
//! the JSON keywords are swapped for their Python spellings. The swap is
//! a plain substring replacement: a string value containing `true`,
//! `false` or `null` is rewritten as well.

use serde_json::Value;

use crate::error::ReproResult;

/// JSON keyword → Python keyword, applied in order.
const KEYWORD_SUBSTITUTIONS: &[(&str, &str)] =
    &[("true", "True"), ("false", "False"), ("null", "None")];

/// Replace every JSON keyword occurrence with the Python keyword.
pub fn pythonize_keywords(json: &str) -> String {
    KEYWORD_SUBSTITUTIONS
        .iter()
        .fold(json.to_string(), |text, (from, to)| text.replace(from, to))
}

/// Render a value as an indented Python literal.
pub fn python_literal(value: &Value) -> ReproResult<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(pythonize_keywords(&json))
}
