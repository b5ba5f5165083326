//! Audit message service
//!
//! Builds create/update/delete audit messages and the list of changed
//! fields for records described by a metadata catalog.

use crate::catalog::MetadataCatalog;
use crate::error::AuditLensResult;
use crate::models::{NormalizedValue, Record};
use crate::normalize::ValueNormalizer;
use crate::resolver::resolve_nullable;

use super::diff::{compare_field, DiffEntry, DiffKind};
use super::entry::{AuditMessage, Operation};

/// Service for building audit messages
pub struct AuditService<'a> {
    catalog: &'a dyn MetadataCatalog,
    normalizer: ValueNormalizer,
}

impl<'a> AuditService<'a> {
    /// Create a new audit service with default date rendering
    pub fn new(catalog: &'a dyn MetadataCatalog) -> Self {
        Self::with_normalizer(catalog, ValueNormalizer::default())
    }

    /// Create an audit service with a configured normalizer
    pub fn with_normalizer(catalog: &'a dyn MetadataCatalog, normalizer: ValueNormalizer) -> Self {
        Self {
            catalog,
            normalizer,
        }
    }

    /// Message for a newly created record
    ///
    /// Empty when the record's type is not auditable.
    pub fn build_create_message(&self, record: &dyn Record) -> AuditLensResult<AuditMessage> {
        let type_name = record.type_name();
        if !self.catalog.is_auditable(type_name) {
            return Ok(AuditMessage::empty(Operation::Create));
        }

        let primary = self.catalog.primary_field(type_name)?;
        let mut message = format!(
            "<p class='{}'>Added new {} with the following: ",
            Operation::Create.container_class(),
            self.render_primary(record)?
        );

        let mut count = 0;
        for field in self.catalog.auditable_fields(type_name)? {
            if field.field_name == primary.field_name {
                continue;
            }
            let value = self.normalized(record, &field.field_name);
            if value.is_blank() {
                continue;
            }
            if count > 0 {
                message.push_str("and ");
            }
            message.push_str(&format!(
                "{}=<span class='field-value'>{}</span> ",
                field.title, value
            ));
            count += 1;
        }
        message.push_str("</p>");

        Ok(AuditMessage::new(Operation::Create, message))
    }

    /// Message describing what changed between two snapshots of a record
    ///
    /// Empty when no auditable field changed.
    pub fn build_update_message(
        &self,
        old: &dyn Record,
        new: &dyn Record,
    ) -> AuditLensResult<AuditMessage> {
        let entries = self.diff(old, new)?;

        let mut fragments: Vec<String> = Vec::new();
        for entry in entries.iter().filter(|e| e.is_change()) {
            fragments.push(render_change(entry));
        }

        if fragments.is_empty() {
            return Ok(AuditMessage::empty(Operation::Update));
        }

        let message = format!(
            "<p class='{}'>Changed {} with the following: {}</p>",
            Operation::Update.container_class(),
            self.render_primary(old)?,
            fragments.join("and ")
        );
        Ok(AuditMessage::new(Operation::Update, message))
    }

    /// Message for a deleted record
    pub fn build_delete_message(&self, record: &dyn Record) -> AuditLensResult<AuditMessage> {
        let message = format!(
            "<p class='{}'>Deleted {}</p>",
            Operation::Delete.container_class(),
            self.render_primary(record)?
        );
        Ok(AuditMessage::new(Operation::Delete, message))
    }

    /// Names of synchronizable fields whose normalized values differ
    ///
    /// Unlike the update message, fields whose old and new values have
    /// incompatible shapes are reported as changed.
    pub fn changed_fields(&self, old: &dyn Record, new: &dyn Record) -> AuditLensResult<Vec<String>> {
        let fields = self.catalog.synchronizable_fields(old.type_name())?;
        Ok(fields
            .into_iter()
            .filter(|field| self.normalized(old, field) != self.normalized(new, field))
            .collect())
    }

    /// Classify every auditable field except the primary one, in catalog order
    ///
    /// Fields whose old and new values have incompatible shapes are skipped
    /// with a warning.
    pub fn diff(&self, old: &dyn Record, new: &dyn Record) -> AuditLensResult<Vec<DiffEntry>> {
        let type_name = old.type_name();
        let primary = self.catalog.primary_field(type_name)?;

        let mut entries = Vec::new();
        for field in self.catalog.auditable_fields(type_name)? {
            if field.field_name == primary.field_name {
                continue;
            }
            tracing::debug!("Building update message for field {}", field.field_name);

            let old_value = self.normalized(old, &field.field_name);
            let new_value = self.normalized(new, &field.field_name);

            match compare_field(field, old_value.clone(), new_value.clone()) {
                Some(field_entries) => entries.extend(field_entries),
                None => {
                    tracing::warn!(
                        field = %field.field_name,
                        old_shape = ?old_value.shape(),
                        new_shape = ?new_value.shape(),
                        "Unable to compare field for audit logging due to difference in datatype"
                    );
                }
            }
        }
        Ok(entries)
    }

    /// "<Type> with <title>:<value>" framing of the primary field
    fn render_primary(&self, record: &dyn Record) -> AuditLensResult<String> {
        let type_name = record.type_name();
        let readable = self.catalog.readable_name(type_name)?;
        let primary = self.catalog.primary_field(type_name)?;

        let value = self.normalized(record, &primary.field_name);
        if value.is_blank() {
            return Ok(readable);
        }
        Ok(format!(
            "{} with {}:<span class='primary-field'>{}</span>",
            readable, primary.title, value
        ))
    }

    fn normalized(&self, record: &dyn Record, field: &str) -> NormalizedValue {
        self.normalizer.normalize(&resolve_nullable(record, field))
    }
}

fn render_change(entry: &DiffEntry) -> String {
    let title = &entry.field.title;
    match entry.kind {
        DiffKind::Added => format!(
            "added {} <span class='field-values-added'>{}</span> ",
            title, entry.new_value
        ),
        DiffKind::Removed => format!(
            "removed {} <span class='field-values-removed'>{}</span> ",
            title, entry.old_value
        ),
        DiffKind::Changed if entry.new_value.is_blank() => format!(
            "{} <span class='field-value-removed'>{}</span> is removed ",
            title, entry.old_value
        ),
        DiffKind::Changed if entry.old_value.is_blank() => format!(
            "{} is set to <span class='field-value-to'>{}</span> ",
            title, entry.new_value
        ),
        DiffKind::Changed => format!(
            "{} from <span class='field-value-from'>{}</span> to <span class='field-value-to'>{}</span> ",
            title, entry.old_value, entry.new_value
        ),
        DiffKind::Unchanged => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::models::{CodedReference, FieldDescriptor, FieldMap, FieldValue, TypeMetadata};
    use crate::test_fixtures::{ninja_catalog, sample_ninja, Clan, Ninja};

    #[test]
    fn test_create_message() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let ninja = sample_ninja();

        let message = service.build_create_message(&ninja).unwrap();
        assert_eq!(message.operation, Operation::Create);
        assert!(message.as_str().starts_with(
            "<p class='add-message'>Added new Ninja with Name:<span class='primary-field'>Kai</span> with the following: "
        ));
        assert!(message.as_str().contains("Last Name=<span class='field-value'>Smith</span> and "));
        assert!(message
            .as_str()
            .contains("Email Address=<span class='field-value'>kai@ninjago.org</span> "));
        assert!(message
            .as_str()
            .contains("Join Date=<span class='field-value'>Sat, 09 Mar 2024</span> "));
        assert!(message
            .as_str()
            .contains("Skill Set=<span class='field-value'>[FIRE, SWORD]</span> "));
        assert!(message.as_str().ends_with("</p>"));
        // Primary field is not repeated in the field list
        assert!(!message.as_str().contains("following: Name="));
    }

    #[test]
    fn test_create_message_skips_blank_fields() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let ninja = Ninja::new("Jay", "Walker");

        let message = service.build_create_message(&ninja).unwrap();
        assert_eq!(
            message.as_str(),
            "<p class='add-message'>Added new Ninja with Name:<span class='primary-field'>Jay</span> with the following: Last Name=<span class='field-value'>Walker</span> </p>"
        );
    }

    #[test]
    fn test_create_message_for_non_auditable_type() {
        let catalog = StaticCatalog::new()
            .with_type(
                TypeMetadata::new("Ninja")
                    .not_auditable()
                    .with_field(FieldDescriptor::new("firstName").primary()),
            )
            .unwrap();
        let service = AuditService::new(&catalog);
        assert!(service.build_create_message(&sample_ninja()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_message() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let message = service.build_delete_message(&sample_ninja()).unwrap();
        assert_eq!(
            message.as_str(),
            "<p class='delete-message'>Deleted Ninja with Name:<span class='primary-field'>Kai</span></p>"
        );
    }

    #[test]
    fn test_delete_message_with_blank_primary() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let message = service.build_delete_message(&Ninja::new("", "Walker")).unwrap();
        assert_eq!(message.as_str(), "<p class='delete-message'>Deleted Ninja</p>");
    }

    #[test]
    fn test_update_message_scalar_changes() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let mut new = old.clone();
        new.last_name = "Jones".into();
        new.email = None;
        new.age = Some(31);

        let message = service.build_update_message(&old, &new).unwrap();
        assert_eq!(
            message.as_str(),
            "<p class='change-message'>Changed Ninja with Name:<span class='primary-field'>Kai</span> with the following: \
             Last Name from <span class='field-value-from'>Smith</span> to <span class='field-value-to'>Jones</span> \
             and Email Address <span class='field-value-removed'>kai@ninjago.org</span> is removed \
             and Age from <span class='field-value-from'>30</span> to <span class='field-value-to'>31</span> </p>"
        );
    }

    #[test]
    fn test_update_message_value_set() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = Ninja::new("Jay", "Walker");
        let mut new = old.clone();
        new.status = Some(CodedReference::new("STATUS_ACTIVE"));

        let message = service.build_update_message(&old, &new).unwrap();
        assert!(message
            .as_str()
            .contains("Status is set to <span class='field-value-to'>STATUS_ACTIVE</span> "));
    }

    #[test]
    fn test_update_message_collection_changes() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let mut new = old.clone();
        new.skill_set = vec![CodedReference::new("SWORD"), CodedReference::new("ICE")];

        let message = service.build_update_message(&old, &new).unwrap();
        assert!(message.as_str().contains(
            "added Skill Set <span class='field-values-added'>[ICE]</span> and removed Skill Set <span class='field-values-removed'>[FIRE]</span> "
        ));
    }

    #[test]
    fn test_update_message_added_only_counts_as_change() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = Ninja::new("Jay", "Walker");
        let mut new = old.clone();
        new.skill_set = vec![CodedReference::new("LIGHTNING")];

        let message = service.build_update_message(&old, &new).unwrap();
        assert!(message
            .as_str()
            .contains("added Skill Set <span class='field-values-added'>[LIGHTNING]</span> "));
    }

    #[test]
    fn test_update_message_reordered_collection_is_silent() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let mut new = old.clone();
        new.skill_set.reverse();

        assert!(service.build_update_message(&old, &new).unwrap().is_empty());
    }

    #[test]
    fn test_update_message_unchanged_is_empty() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let new = old.clone();

        let message = service.build_update_message(&old, &new).unwrap();
        assert!(message.is_empty());
        assert_eq!(message.operation, Operation::Update);
    }

    #[test]
    fn test_update_message_entity_reference() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let mut new = old.clone();
        new.main_clan = Some(Clan::new(11, "Water Temple"));

        let message = service.build_update_message(&old, &new).unwrap();
        assert!(message.as_str().contains(
            "Clan from <span class='field-value-from'>Fire Temple</span> to <span class='field-value-to'>Water Temple</span> "
        ));
    }

    #[test]
    fn test_mismatched_shapes_skipped_but_reported_changed() {
        let catalog = StaticCatalog::new()
            .with_type(
                TypeMetadata::new("Map")
                    .with_field(FieldDescriptor::new("name").primary())
                    .with_field(FieldDescriptor::new("tags").auditable()),
            )
            .unwrap();
        let service = AuditService::new(&catalog);
        let old = FieldMap::new().with("name", "Bob").with("tags", "solo");
        let new = FieldMap::new().with("name", "Bob").with("tags", vec!["a", "b"]);

        assert!(service.build_update_message(&old, &new).unwrap().is_empty());
        assert_eq!(service.changed_fields(&old, &new).unwrap(), vec!["tags".to_string()]);
    }

    #[test]
    fn test_changed_fields() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let mut new = old.clone();
        new.age = Some(31);
        new.skill_set.reverse();
        new.tags.clear();

        assert_eq!(service.changed_fields(&old, &new).unwrap(), vec!["age".to_string()]);
    }

    #[test]
    fn test_diff_entries() {
        let catalog = ninja_catalog();
        let service = AuditService::new(&catalog);
        let old = sample_ninja();
        let mut new = old.clone();
        new.active = Some(false);

        let entries = service.diff(&old, &new).unwrap();
        let changed: Vec<_> = entries.iter().filter(|e| e.is_change()).collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].field.field_name, "active");
        assert_eq!(changed[0].kind, DiffKind::Changed);
        // Primary field is never diffed
        assert!(entries.iter().all(|e| e.field.field_name != "firstName"));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let catalog = StaticCatalog::new();
        let service = AuditService::new(&catalog);
        let ninja = sample_ninja();
        assert!(service.build_delete_message(&ninja).is_err());
        assert!(service.build_update_message(&ninja, &ninja).is_err());
        // Create on an unregistered type is simply not audited
        assert!(service.build_create_message(&ninja).unwrap().is_empty());
    }

    #[test]
    fn test_list_of_nulls_is_unchanged_from_empty() {
        let catalog = StaticCatalog::new()
            .with_type(
                TypeMetadata::new("Map")
                    .with_field(FieldDescriptor::new("name").primary())
                    .with_field(FieldDescriptor::new("tags").auditable()),
            )
            .unwrap();
        let service = AuditService::new(&catalog);
        let old = FieldMap::new().with("name", "Bob");
        let new = FieldMap::new()
            .with("name", "Bob")
            .with("tags", FieldValue::List(vec![FieldValue::Null]));

        assert!(service.build_update_message(&old, &new).unwrap().is_empty());
        assert!(service.changed_fields(&old, &new).unwrap().is_empty());
    }
}
