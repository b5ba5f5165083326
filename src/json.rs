//! JSON record adapter
//!
//! Loads records from JSON documents so they can be audited, queried and
//! substituted without a typed domain model:
//!
//! ```json
//! {
//!   "$type": "Ninja",
//!   "id": 42,
//!   "firstName": "Kai",
//!   "status": { "$code": "STATUS_NEW" },
//!   "joinDate": { "$date": "2024-03-09" },
//!   "mainClan": { "$type": "Clan", "id": 7, "name": "Fire Temple" },
//!   "address": { "$type": "Address", "zip": "90210" },
//!   "tags": ["red", "hero"]
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AuditLensError, AuditLensResult};
use crate::models::{AccessError, CodedReference, FieldMap, FieldValue, Identity, Record, ValueKind};

const TYPE_KEY: &str = "$type";
const ID_KEY: &str = "id";

/// A record backed by a JSON object
#[derive(Debug, Clone)]
pub struct JsonRecord {
    type_name: String,
    identity: Option<Identity>,
    fields: BTreeMap<String, FieldValue>,
}

impl JsonRecord {
    /// Convert a top-level JSON object carrying `$type`
    pub fn from_value(value: Value) -> AuditLensResult<Self> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(AuditLensError::Json(format!(
                "record must be a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_json_str(json: &str) -> AuditLensResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Read a record from a JSON file
    pub fn load(path: &Path) -> AuditLensResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AuditLensError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    fn from_object(mut object: Map<String, Value>) -> AuditLensResult<Self> {
        let type_name = match object.remove(TYPE_KEY) {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            Some(_) => {
                return Err(AuditLensError::Json(format!(
                    "'{}' must be a non-empty string",
                    TYPE_KEY
                )))
            }
            None => return Err(AuditLensError::Json(format!("record is missing '{}'", TYPE_KEY))),
        };

        let identity = match object.get(ID_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.as_i64().ok_or_else(|| {
                AuditLensError::Json(format!("'{}' of {} must be an integer", ID_KEY, type_name))
            })?),
            Some(_) => {
                return Err(AuditLensError::Json(format!(
                    "'{}' of {} must be an integer",
                    ID_KEY, type_name
                )))
            }
        };

        let mut fields = BTreeMap::new();
        for (key, value) in object {
            fields.insert(key, convert(value)?);
        }

        Ok(Self {
            type_name,
            identity,
            fields,
        })
    }
}

impl Record for JsonRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn identity(&self) -> Option<Identity> {
        self.identity
    }

    fn read(&self, field: &str) -> Result<FieldValue, AccessError> {
        self.fields
            .get(field)
            .cloned()
            .ok_or_else(|| AccessError::no_such_field(field))
    }

    fn declared_kind(&self, field: &str) -> Option<ValueKind> {
        self.fields.get(field).and_then(FieldValue::kind)
    }

    fn label(&self) -> String {
        match self.fields.get("name") {
            Some(FieldValue::Text(name)) if !name.is_empty() => name.clone(),
            _ => match self.identity {
                Some(id) => format!("{}#{}", self.type_name, id),
                None => self.type_name.clone(),
            },
        }
    }
}

fn convert(value: Value) -> AuditLensResult<FieldValue> {
    let converted = match value {
        Value::Null => FieldValue::Null,
        Value::Bool(b) => FieldValue::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Integer(i),
            None => FieldValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => FieldValue::Text(s),
        Value::Array(items) => FieldValue::List(
            items
                .into_iter()
                .map(convert)
                .collect::<AuditLensResult<Vec<_>>>()?,
        ),
        Value::Object(object) => convert_object(object)?,
    };
    Ok(converted)
}

fn convert_object(object: Map<String, Value>) -> AuditLensResult<FieldValue> {
    if let Some(key) = object.get("$code") {
        let key = expect_str(key, "$code")?;
        let code = match object.get("value").and_then(Value::as_str) {
            Some(value) => CodedReference::with_value(key, value),
            None => CodedReference::new(key),
        };
        return Ok(FieldValue::Code(code));
    }
    if let Some(date) = object.get("$date") {
        let date = expect_str(date, "$date")?;
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| AuditLensError::Json(format!("invalid $date '{}': {}", date, e)))?;
        return Ok(FieldValue::Date(parsed));
    }
    if let Some(ts) = object.get("$timestamp") {
        let ts = expect_str(ts, "$timestamp")?;
        let parsed = DateTime::parse_from_rfc3339(ts)
            .map_err(|e| AuditLensError::Json(format!("invalid $timestamp '{}': {}", ts, e)))?;
        return Ok(FieldValue::Timestamp(parsed.with_timezone(&Utc)));
    }
    if let Some(class) = object.get("$class") {
        return Ok(FieldValue::Type(expect_str(class, "$class")?.to_string()));
    }
    if object.contains_key(TYPE_KEY) {
        let is_entity = object.get(ID_KEY).is_some_and(|id| !id.is_null());
        let record = JsonRecord::from_object(object)?;
        return Ok(if is_entity {
            FieldValue::Entity(Arc::new(record))
        } else {
            FieldValue::Record(Arc::new(record))
        });
    }

    let mut map = FieldMap::new();
    for (key, value) in object {
        map.insert(key, convert(value)?);
    }
    Ok(FieldValue::Map(map))
}

fn expect_str<'v>(value: &'v Value, key: &str) -> AuditLensResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| AuditLensError::Json(format!("'{}' must be a string", key)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
