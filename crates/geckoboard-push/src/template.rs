//! Minimal text templating for chart configurations
//!
//! Chart configurations are script object literals, not pure JSON, so they
//! are assembled from text. Every interpolated value goes through one of the
//! helpers here first: [`escape_script_string`] for text placed inside a
//! quoted string, [`json_literal`] for structured data.

use serde::Serialize;

use crate::error::{PushError, Result};

/// Escape text for use inside a single- or double-quoted script string literal
pub fn escape_script_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // keeps markup out of the rendered page
            '<' => out.push_str("\\x3C"),
            '>' => out.push_str("\\x3E"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Serialize `value` as a JSON literal that is also a valid script literal
pub fn json_literal<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029"))
}

/// A text template with `{{name}}` placeholders
///
/// Rendering is a single pass: substituted text is never scanned for
/// placeholders again.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    /// Substitute every placeholder with its value
    ///
    /// Values are inserted as-is; escape them before calling.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| PushError::Template("unterminated placeholder".to_string()))?;
            let name = after[..end].trim();
            let value = values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| PushError::Template(format!("no value for '{}'", name)))?;
            out.push_str(value);
            rest = &after[end + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}
