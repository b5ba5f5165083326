//! Descriptor-driven structural copies
//!
//! Takes an owned copy of a record's persistent fields so the "before" side
//! of an update survives mutation of the live record. Embedded records of a
//! registered type are copied with the same descriptors; entity references
//! stay shared.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::catalog::MetadataCatalog;
use crate::config::EngineSettings;
use crate::error::AuditLensResult;
use crate::models::{AccessError, FieldMap, FieldValue, Identity, Record, ValueKind};
use crate::resolver::resolve_nullable;

/// Owned copy of a record's persistent fields
#[derive(Debug, Clone)]
pub struct Snapshot {
    type_name: String,
    identity: Option<Identity>,
    label: String,
    fields: BTreeMap<String, FieldValue>,
    kinds: BTreeMap<String, ValueKind>,
}

impl Snapshot {
    /// Names of the copied fields
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}

impl Record for Snapshot {
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
        self.kinds.get(field).cloned()
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

/// Copy a record through its catalog descriptors
pub fn snapshot(
    record: &dyn Record,
    catalog: &dyn MetadataCatalog,
    settings: &EngineSettings,
) -> AuditLensResult<Arc<Snapshot>> {
    let copier = Copier {
        catalog,
        max_depth: settings.max_copy_depth,
    };
    Ok(Arc::new(copier.copy_record(record, 0)?))
}

struct Copier<'a> {
    catalog: &'a dyn MetadataCatalog,
    max_depth: usize,
}

impl Copier<'_> {
    fn copy_record(&self, record: &dyn Record, depth: usize) -> AuditLensResult<Snapshot> {
        let mut fields = BTreeMap::new();
        let mut kinds = BTreeMap::new();

        for field in self.catalog.persistent_fields(record.type_name())? {
            let name = &field.field_name;
            let value = resolve_nullable(record, name);
            fields.insert(name.clone(), self.copy_value(value, depth)?);
            if let Some(kind) = record.declared_kind(name) {
                kinds.insert(name.clone(), kind);
            }
        }

        Ok(Snapshot {
            type_name: record.type_name().to_string(),
            identity: record.identity(),
            label: record.label(),
            fields,
            kinds,
        })
    }

    fn copy_value(&self, value: FieldValue, depth: usize) -> AuditLensResult<FieldValue> {
        let copied = match value {
            FieldValue::Record(nested) => {
                if self.catalog.type_metadata(nested.type_name()).is_err() {
                    FieldValue::Record(nested)
                } else if depth >= self.max_depth {
                    tracing::warn!(
                        record_type = nested.type_name(),
                        max_depth = self.max_depth,
                        "Copy depth exceeded; nested record left shared"
                    );
                    FieldValue::Record(nested)
                } else {
                    let copy = self.copy_record(nested.as_ref(), depth + 1)?;
                    FieldValue::Record(Arc::new(copy))
                }
            }
            FieldValue::List(items) => FieldValue::List(
                items
                    .into_iter()
                    .map(|item| self.copy_value(item, depth))
                    .collect::<AuditLensResult<Vec<_>>>()?,
            ),
            FieldValue::Map(map) => {
                let mut copy = FieldMap::new();
                for (key, item) in map.iter() {
                    copy.insert(key.clone(), self.copy_value(item.clone(), depth)?);
                }
                FieldValue::Map(copy)
            }
            other => other,
        };
        Ok(copied)
    }
}
