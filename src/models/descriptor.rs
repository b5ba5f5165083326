//! Field and type metadata
//!
//! Descriptors are what a metadata catalog hands out per record type. The
//! order of `fields` is significant: it drives message and clause ordering.

use serde::{Deserialize, Serialize};

/// Metadata about one field of a record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as understood by `Record::read`
    pub field_name: String,

    /// Display title; derived from the field name when left empty
    #[serde(default)]
    pub title: String,

    /// Identifies the record in audit messages
    #[serde(default, rename = "primary")]
    pub is_primary: bool,

    /// Participates in audit diffing
    #[serde(default, rename = "auditable")]
    pub is_auditable: bool,

    /// Participates in query-by-example clauses
    #[serde(default, rename = "searchable")]
    pub is_searchable: bool,

    /// Stored with the record (URL parameters, structural copies)
    #[serde(default = "default_true", rename = "persistent")]
    pub is_persistent: bool,
}

fn default_true() -> bool {
    true
}

impl FieldDescriptor {
    /// Create a persistent field with a derived title and no roles
    pub fn new(field_name: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            title: humanize(&field_name),
            field_name,
            is_primary: false,
            is_auditable: false,
            is_searchable: false,
            is_persistent: true,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn auditable(mut self) -> Self {
        self.is_auditable = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.is_searchable = true;
        self
    }

    /// Mark the field as not stored
    pub fn transient(mut self) -> Self {
        self.is_persistent = false;
        self
    }
}

/// Metadata for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    /// Type name as returned by `Record::type_name`
    pub type_name: String,

    /// Name used in audit messages; derived from the type name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readable_name: Option<String>,

    /// Whether create messages are produced for this type
    #[serde(default = "default_true")]
    pub auditable: bool,

    /// Declared fields, in display order
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl TypeMetadata {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            readable_name: None,
            auditable: true,
            fields: Vec::new(),
        }
    }

    pub fn with_readable_name(mut self, name: impl Into<String>) -> Self {
        self.readable_name = Some(name.into());
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn not_auditable(mut self) -> Self {
        self.auditable = false;
        self
    }

    /// Readable name, falling back to the humanized type name
    pub fn display_name(&self) -> String {
        self.readable_name
            .clone()
            .unwrap_or_else(|| humanize(&self.type_name))
    }

    pub fn primary_field(&self) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.is_primary)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.field_name == name)
    }
}

/// Split a camelCase, PascalCase or snake_case identifier into title-cased words
///
/// "firstName" → "First Name", "SystemCodes" → "System Codes",
/// "join_date" → "Join Date".
pub fn humanize(identifier: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in identifier.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("firstName"), "First Name");
        assert_eq!(humanize("SystemCodes"), "System Codes");
        assert_eq!(humanize("join_date"), "Join Date");
        assert_eq!(humanize("id"), "Id");
        assert_eq!(humanize("HTTPServer"), "HTTPServer");
    }

    #[test]
    fn test_descriptor_builder() {
        let field = FieldDescriptor::new("email")
            .titled("Email Address")
            .auditable()
            .searchable();
        assert_eq!(field.title, "Email Address");
        assert!(field.is_auditable);
        assert!(field.is_searchable);
        assert!(field.is_persistent);
        assert!(!field.is_primary);
    }

    #[test]
    fn test_type_metadata_lookup() {
        let meta = TypeMetadata::new("SystemCodes")
            .with_field(FieldDescriptor::new("key").primary())
            .with_field(FieldDescriptor::new("value").auditable());
        assert_eq!(meta.display_name(), "System Codes");
        assert_eq!(meta.primary_field().unwrap().field_name, "key");
        assert!(meta.field("value").is_some());
        assert!(meta.field("missing").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"field_name": "age", "auditable": true}"#).unwrap();
        assert!(field.is_auditable);
        assert!(field.is_persistent);
        assert!(field.title.is_empty());
    }
}
