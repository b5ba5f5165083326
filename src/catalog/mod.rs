//! Metadata catalog
//!
//! The engine never discovers metadata on its own. Callers inject a
//! [`MetadataCatalog`] that answers, per record type, which field is primary
//! and which fields are auditable, searchable and persistent.
//!
//! [`StaticCatalog`] is the bundled implementation, populated by explicit
//! registration or from a YAML/JSON declaration:
//!
//! ```yaml
//! types:
//!   - type_name: Ninja
//!     fields:
//!       - field_name: firstName
//!         title: Name
//!         primary: true
//!         searchable: true
//!       - field_name: email
//!         auditable: true
//! ```

mod registry;

pub use registry::StaticCatalog;

use crate::error::{AuditLensError, AuditLensResult};
use crate::models::{FieldDescriptor, TypeMetadata};

/// Per-type field metadata lookups
///
/// Implementations must return fields in a stable order for a given type.
pub trait MetadataCatalog: Send + Sync {
    /// All metadata for a type
    fn type_metadata(&self, type_name: &str) -> AuditLensResult<&TypeMetadata>;

    /// Name used for the type in audit messages
    fn readable_name(&self, type_name: &str) -> AuditLensResult<String> {
        Ok(self.type_metadata(type_name)?.display_name())
    }

    /// Whether the type produces audit messages; unknown types do not
    fn is_auditable(&self, type_name: &str) -> bool {
        self.type_metadata(type_name)
            .map(|meta| meta.auditable)
            .unwrap_or(false)
    }

    fn primary_field(&self, type_name: &str) -> AuditLensResult<&FieldDescriptor> {
        self.type_metadata(type_name)?
            .primary_field()
            .ok_or_else(|| AuditLensError::NoPrimaryField(type_name.to_string()))
    }

    fn auditable_fields(&self, type_name: &str) -> AuditLensResult<Vec<&FieldDescriptor>> {
        Ok(self
            .type_metadata(type_name)?
            .fields
            .iter()
            .filter(|f| f.is_auditable)
            .collect())
    }

    fn searchable_fields(&self, type_name: &str) -> AuditLensResult<Vec<&FieldDescriptor>> {
        Ok(self
            .type_metadata(type_name)?
            .fields
            .iter()
            .filter(|f| f.is_searchable)
            .collect())
    }

    fn persistent_fields(&self, type_name: &str) -> AuditLensResult<Vec<&FieldDescriptor>> {
        Ok(self
            .type_metadata(type_name)?
            .fields
            .iter()
            .filter(|f| f.is_persistent)
            .collect())
    }

    /// Field names compared by `changed_fields`; the auditable set by default
    fn synchronizable_fields(&self, type_name: &str) -> AuditLensResult<Vec<String>> {
        Ok(self
            .auditable_fields(type_name)?
            .into_iter()
            .map(|f| f.field_name.clone())
            .collect())
    }
}
