//! Dotted property path resolution
//!
//! Reads values such as `firstName`, `address.zip` or `subClans.name` out of
//! any [`Record`]. Map-like records are looked up by literal key; other
//! records are read through their accessor, where a segment may be written
//! as the field name (`firstName`) or as a getter (`getFirstName`).
//!
//! When an intermediate value is a collection and path remains, the rest of
//! the path is applied to every element and the per-element results are
//! returned as a list. Null elements and elements resolving to null are
//! skipped.

use crate::error::{AuditLensError, AuditLensResult};
use crate::models::{field_name_for_accessor, AccessError, FieldValue, Record, ValueKind};

/// Resolve a dotted path, failing on missing accessors or untraversable values
pub fn resolve(record: &dyn Record, path: &str) -> AuditLensResult<FieldValue> {
    if path.trim().is_empty() {
        return Err(AuditLensError::path(path, "empty path"));
    }
    resolve_from(record, path, path)
}

/// Resolve a dotted path, treating any resolution failure as an absent value
pub fn resolve_nullable(record: &dyn Record, path: &str) -> FieldValue {
    match resolve(record, path) {
        Ok(value) => value,
        Err(e) => {
            tracing::trace!("Treating unresolvable path as null: {}", e);
            FieldValue::Null
        }
    }
}

/// Resolve the declared type of the field a dotted path ends on
pub fn resolve_type(record: &dyn Record, path: &str) -> AuditLensResult<ValueKind> {
    if path.trim().is_empty() {
        return Err(AuditLensError::path(path, "empty path"));
    }
    resolve_type_from(record, path, path)
}

fn resolve_from(record: &dyn Record, full_path: &str, remaining: &str) -> AuditLensResult<FieldValue> {
    let (head, rest) = split_head(remaining);
    let value = read_segment(record, head).map_err(|e| AuditLensError::path(full_path, e.to_string()))?;

    match rest {
        None => Ok(value),
        Some(rest) => descend(value, full_path, rest),
    }
}

fn descend(value: FieldValue, full_path: &str, rest: &str) -> AuditLensResult<FieldValue> {
    match value {
        FieldValue::Null => Ok(FieldValue::Null),
        FieldValue::List(items) => {
            let mut results = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    continue;
                }
                let resolved = descend(item, full_path, rest)?;
                if !resolved.is_null() {
                    results.push(resolved);
                }
            }
            Ok(FieldValue::List(results))
        }
        FieldValue::Unloaded => Err(AuditLensError::path(
            full_path,
            "collection contents are not loaded",
        )),
        other => match other.as_record() {
            Some(record) => resolve_from(record, full_path, rest),
            None => Err(AuditLensError::path(
                full_path,
                format!("{} value cannot be traversed", other.kind_name()),
            )),
        },
    }
}

fn resolve_type_from(record: &dyn Record, full_path: &str, remaining: &str) -> AuditLensResult<ValueKind> {
    let (head, rest) = split_head(remaining);

    let Some(rest) = rest else {
        let field = match record.as_map() {
            Some(_) => head.to_string(),
            None => field_name_for_accessor(head),
        };
        return record.declared_kind(&field).ok_or_else(|| {
            AuditLensError::path(full_path, format!("no declared type for '{}'", head))
        });
    };

    let value = read_segment(record, head).map_err(|e| AuditLensError::path(full_path, e.to_string()))?;
    type_of_nested(value, full_path, head, rest)
}

fn type_of_nested(value: FieldValue, full_path: &str, head: &str, rest: &str) -> AuditLensResult<ValueKind> {
    match value {
        FieldValue::Null => Err(AuditLensError::path(full_path, format!("'{}' is null", head))),
        FieldValue::List(items) => match items.into_iter().find(|item| !item.is_null()) {
            Some(first) => type_of_nested(first, full_path, head, rest),
            None => Err(AuditLensError::path(
                full_path,
                format!("'{}' has no elements to inspect", head),
            )),
        },
        other => match other.as_record() {
            Some(record) => resolve_type_from(record, full_path, rest),
            None => Err(AuditLensError::path(
                full_path,
                format!("{} value cannot be traversed", other.kind_name()),
            )),
        },
    }
}

fn split_head(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}

fn read_segment(record: &dyn Record, segment: &str) -> Result<FieldValue, AccessError> {
    if segment.is_empty() {
        return Err(AccessError::no_such_field(segment));
    }
    match record.as_map() {
        Some(map) => Ok(map.get(segment).cloned().unwrap_or(FieldValue::Null)),
        None => record.read(&field_name_for_accessor(segment)),
    }
}
