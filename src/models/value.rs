//! Field values
//!
//! `FieldValue` is the closed set of value kinds the engine understands.
//! Raw values are classified once, when a record hands them out through
//! [`Record::read`](super::record::Record::read); every algorithm after that
//! matches on the variant instead of probing types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::coded::CodedReference;
use super::record::{FieldMap, Identity, Record};

/// A classified field value
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Absent value
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Calendar date without time of day
    Date(NaiveDate),
    /// Point in time
    Timestamp(DateTime<Utc>),
    /// Lookup-table entry, rendered by key
    Code(CodedReference),
    /// Reference to another identified record
    Entity(Arc<dyn Record>),
    /// Embedded value record without identity of its own
    Record(Arc<dyn Record>),
    /// A type name held as a value (discriminator columns and the like)
    Type(String),
    List(Vec<FieldValue>),
    Map(FieldMap),
    /// Collection whose contents cannot be read (e.g. detached lazy load)
    Unloaded,
}

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Integer,
    Float,
    Boolean,
    Date,
    Timestamp,
    Code,
    Entity(String),
    Record(String),
    Type,
    List(Box<ValueKind>),
    Map,
    Unknown,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Code => write!(f, "code"),
            Self::Entity(name) => write!(f, "entity<{}>", name),
            Self::Record(name) => write!(f, "record<{}>", name),
            Self::Type => write!(f, "type"),
            Self::List(inner) => write!(f, "list<{}>", inner),
            Self::Map => write!(f, "map"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl FieldValue {
    /// Wrap a record as an entity reference
    pub fn entity(record: impl Record + 'static) -> Self {
        Self::Entity(Arc::new(record))
    }

    /// Wrap a record as an embedded value record
    pub fn record(record: impl Record + 'static) -> Self {
        Self::Record(Arc::new(record))
    }

    pub fn code(key: impl Into<String>) -> Self {
        Self::Code(CodedReference::new(key))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Lists, maps and unreadable collections
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_) | Self::Unloaded)
    }

    /// Record that path resolution can descend into
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            Self::Entity(record) | Self::Record(record) => Some(record.as_ref()),
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Identity of an entity reference
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Self::Entity(record) => record.identity(),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Date(_) => "date",
            Self::Timestamp(_) => "timestamp",
            Self::Code(_) => "code",
            Self::Entity(_) => "entity",
            Self::Record(_) => "record",
            Self::Type(_) => "type",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Unloaded => "unloaded",
        }
    }

    /// Kind of the current value; `None` for null
    pub fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Date(_) => ValueKind::Date,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Code(_) => ValueKind::Code,
            Self::Entity(record) => ValueKind::Entity(record.type_name().to_string()),
            Self::Record(record) => ValueKind::Record(record.type_name().to_string()),
            Self::Type(_) => ValueKind::Type,
            Self::List(items) => ValueKind::List(Box::new(
                items
                    .iter()
                    .find_map(FieldValue::kind)
                    .unwrap_or(ValueKind::Unknown),
            )),
            Self::Map(_) => ValueKind::Map,
            Self::Unloaded => ValueKind::List(Box::new(ValueKind::Unknown)),
        };
        Some(kind)
    }

    /// Canonical string form; `None` for null and unreadable values
    pub fn canonical_string(&self) -> Option<String> {
        match self {
            Self::Null | Self::Unloaded => None,
            Self::Text(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::Timestamp(t) => Some(t.to_rfc3339()),
            Self::Code(code) => Some(code.key.clone()),
            Self::Entity(record) | Self::Record(record) => Some(record.label()),
            Self::Type(name) => Some(name.clone()),
            Self::List(items) => Some(format!(
                "[{}]",
                items
                    .iter()
                    .map(|item| item.canonical_string().unwrap_or_else(|| "null".into()))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            Self::Map(map) => Some(format!(
                "{{{}}}",
                map.iter()
                    .map(|(k, v)| {
                        format!("{}={}", k, v.canonical_string().unwrap_or_else(|| "null".into()))
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }

    /// True when the value has no non-blank string form
    pub fn is_blank(&self) -> bool {
        self.canonical_string()
            .map_or(true, |s| s.trim().is_empty())
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) | (Self::Unloaded, Self::Unloaded) => true,
            (Self::Text(a), Self::Text(b)) | (Self::Type(a), Self::Type(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Code(a), Self::Code(b)) => a == b,
            (Self::Entity(a), Self::Entity(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.type_name() == b.type_name()
                        && a.identity().is_some()
                        && a.identity() == b.identity())
            }
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_string() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "null"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<CodedReference> for FieldValue {
    fn from(value: CodedReference) -> Self {
        Self::Code(value)
    }
}

impl From<FieldMap> for FieldValue {
    fn from(value: FieldMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}
