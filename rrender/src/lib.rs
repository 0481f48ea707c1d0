//! Pure formatters turning backend replies into human-readable chat text.
//!
//! Formatters are chosen by payload shape at the call site, never by error
//! detection here.
//!
//! ```rust
//! use rrender::render_list;
//!
//! let text = render_list(&["LogisticRegression".to_string(), "RandomForest".to_string()]);
//! assert_eq!(text, "LogisticRegression\nRandomForest");
//! ```

use std::collections::BTreeMap;
use std::fmt::Write;

use rgateway::{ErrorMeta, FieldErrorDetail, FieldErrors};
use serde_json::Value;

/// Newline-joined flat list (available classes).
pub fn render_list(items: &[String]) -> String {
    items.join("\n")
}

/// One `For {key}: {comma-joined items}` block per key, blocks separated by a
/// blank line (available parameters per class).
pub fn render_grouped_lists(groups: &BTreeMap<String, Vec<String>>) -> String {
    let mut text = String::new();
    for (key, items) in groups {
        let _ = writeln!(text, "For {key}: {}\n", items.join(", "));
    }

    text
}

/// The backend's validation shape verbatim: every top-level field gets a
/// `Check {field}` line; a plain-string detail is appended directly, a nested
/// field map gets one indented `Check {subfield}:` line carrying only the
/// first message of that subfield's list.
pub fn render_field_errors(errors: &FieldErrors) -> String {
    let mut text = String::new();
    for (field, detail) in errors {
        let _ = writeln!(text, "Check {field}");
        match detail {
            FieldErrorDetail::Message(message) => {
                let _ = writeln!(text, "{message}");
            }
            FieldErrorDetail::Nested(subfields) => {
                for (subfield, messages) in subfields {
                    let first = messages.first().map(String::as_str).unwrap_or_default();
                    let _ = writeln!(text, "\t\t\tCheck {subfield}:\n\t\t\t\t\t\t{first}");
                }
            }
        }
    }

    text
}

/// Dispatches a backend `meta` by shape: plain messages pass through,
/// field maps go through [`render_field_errors`].
pub fn render_meta(meta: &ErrorMeta) -> String {
    match meta {
        ErrorMeta::Message(message) => message.clone(),
        ErrorMeta::Fields(fields) => render_field_errors(fields),
    }
}

/// Pretty-printed JSON for model catalogs and descriptors.
pub fn render_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
