//! Record abstraction
//!
//! Everything the engine reads goes through the [`Record`] trait: typed
//! domain structs implement it by hand, [`FieldMap`] implements it as a
//! key/value container, and the snapshot and JSON adapters implement it for
//! owned copies.

use std::collections::BTreeMap;
use std::fmt;

use super::value::{FieldValue, ValueKind};

/// Identity of a persisted entity
pub type Identity = i64;

/// A typed record with named fields
pub trait Record: fmt::Debug + Send + Sync {
    /// Name of the record type, used for catalog lookups
    fn type_name(&self) -> &str;

    /// Identity of the record; `None` until persisted or for value records
    fn identity(&self) -> Option<Identity> {
        None
    }

    /// Read a field by name
    fn read(&self, field: &str) -> Result<FieldValue, AccessError>;

    /// Declared type of a field, independent of its current value
    fn declared_kind(&self, field: &str) -> Option<ValueKind> {
        let _ = field;
        None
    }

    /// Rendering used when the record appears as a field value
    fn label(&self) -> String {
        match self.identity() {
            Some(id) => format!("{}#{}", self.type_name(), id),
            None => self.type_name().to_string(),
        }
    }

    /// Map-like records are looked up by literal key instead of accessor
    fn as_map(&self) -> Option<&FieldMap> {
        None
    }
}

/// Failure to read a single field from a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The record has no accessor for the field
    NoSuchField(String),
    /// The accessor exists but failed
    Failed { field: String, reason: String },
}

impl AccessError {
    /// Shorthand for an unknown field
    pub fn no_such_field(field: impl Into<String>) -> Self {
        Self::NoSuchField(field.into())
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchField(field) => write!(f, "no accessor for '{}'", field),
            Self::Failed { field, reason } => {
                write!(f, "accessor for '{}' failed: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for AccessError {}

/// Convert an accessor name into the field name it reads
///
/// `getFirstName` and `get_first_name` name `firstName` and `first_name`;
/// anything else is already a field name.
pub fn field_name_for_accessor(segment: &str) -> String {
    if let Some(rest) = segment.strip_prefix("get_") {
        if !rest.is_empty() {
            return rest.to_string();
        }
    }
    if let Some(rest) = segment.strip_prefix("get") {
        let mut chars = rest.chars();
        if let Some(first) = chars.next() {
            if first.is_uppercase() {
                return first.to_lowercase().chain(chars).collect();
            }
        }
    }
    segment.to_string()
}

/// Ordered key/value record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(BTreeMap<String, FieldValue>);

impl FieldMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Record for FieldMap {
    fn type_name(&self) -> &str {
        "Map"
    }

    fn read(&self, field: &str) -> Result<FieldValue, AccessError> {
        Ok(self.0.get(field).cloned().unwrap_or(FieldValue::Null))
    }

    fn declared_kind(&self, field: &str) -> Option<ValueKind> {
        self.0.get(field).and_then(FieldValue::kind)
    }

    fn as_map(&self) -> Option<&FieldMap> {
        Some(self)
    }
}
