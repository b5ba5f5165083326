//! Named parameter substitution
//!
//! Replaces `:name` tokens in a query template with literals rendered from a
//! record. A token is a colon followed by a run of non-whitespace
//! characters, and the run is resolved as a dotted path.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{FieldValue, Record};
use crate::resolver::resolve_nullable;

static PARAMETER: Lazy<Regex> = Lazy::new(|| Regex::new(r":([^\s]+)").expect("parameter regex"));

/// Substitute every `:path` token in `template` with the value it resolves to
///
/// - absent values become `null`
/// - text becomes a single-quoted literal
/// - collections become a comma-separated list: coded references as quoted
///   keys, entity references as bare identities, other elements quoted
/// - anything else is written unquoted
pub fn replace_parameters(template: &str, record: &dyn Record) -> String {
    PARAMETER
        .replace_all(template, |caps: &Captures| {
            render_literal(&resolve_nullable(record, &caps[1]))
        })
        .into_owned()
}

fn render_literal(value: &FieldValue) -> String {
    match value {
        FieldValue::Null => "null".to_string(),
        FieldValue::Text(s) => quote(s),
        FieldValue::List(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(render_element)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn render_element(value: &FieldValue) -> String {
    match value {
        FieldValue::Code(code) => quote(&code.key),
        FieldValue::Entity(record) => record
            .identity()
            .map_or_else(|| "null".to_string(), |id| id.to_string()),
        other => quote(&other.to_string()),
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
