//! Field-level diff classification
//!
//! Compares the normalized old and new values of a single field. Scalar
//! fields are `Unchanged` or `Changed`; collection fields report the
//! elements that were `Added` and `Removed` by membership.

use serde::Serialize;

use crate::models::{FieldDescriptor, NormalizedValue, Shape};

/// Change classification of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Unchanged,
    Changed,
    /// Elements present in the new collection only
    Added,
    /// Elements present in the old collection only
    Removed,
}

/// One field's change between two snapshots
///
/// For `Added` entries `new_value` holds the added elements and `old_value`
/// is empty; `Removed` entries hold the removed elements in `old_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub field: FieldDescriptor,
    pub kind: DiffKind,
    pub old_value: NormalizedValue,
    pub new_value: NormalizedValue,
}

impl DiffEntry {
    pub fn is_change(&self) -> bool {
        self.kind != DiffKind::Unchanged
    }
}

/// Classify a field, or `None` when old and new have incompatible shapes
pub fn compare_field(
    field: &FieldDescriptor,
    old: NormalizedValue,
    new: NormalizedValue,
) -> Option<Vec<DiffEntry>> {
    if !old.is_compatible_with(&new) {
        return None;
    }

    let is_collection = old.shape() == Shape::Sequence || new.shape() == Shape::Sequence;
    if !is_collection {
        let kind = if old == new {
            DiffKind::Unchanged
        } else {
            DiffKind::Changed
        };
        return Some(vec![DiffEntry {
            field: field.clone(),
            kind,
            old_value: old,
            new_value: new,
        }]);
    }

    let added = new.difference(&old);
    let removed = old.difference(&new);

    if added.is_empty() && removed.is_empty() {
        return Some(vec![DiffEntry {
            field: field.clone(),
            kind: DiffKind::Unchanged,
            old_value: old,
            new_value: new,
        }]);
    }

    let mut entries = Vec::with_capacity(2);
    if !added.is_empty() {
        entries.push(DiffEntry {
            field: field.clone(),
            kind: DiffKind::Added,
            old_value: NormalizedValue::Empty,
            new_value: NormalizedValue::Sequence(added),
        });
    }
    if !removed.is_empty() {
        entries.push(DiffEntry {
            field: field.clone(),
            kind: DiffKind::Removed,
            old_value: NormalizedValue::Sequence(removed),
            new_value: NormalizedValue::Empty,
        });
    }
    Some(entries)
}
