//! Flat parameter maps and URL query strings

use std::collections::BTreeMap;

use crate::catalog::MetadataCatalog;
use crate::error::AuditLensResult;
use crate::models::{FieldValue, Record};
use crate::resolver::resolve_nullable;

/// Flatten the persistent fields of a record into string values
pub fn build_map_values(
    catalog: &dyn MetadataCatalog,
    record: &dyn Record,
) -> AuditLensResult<BTreeMap<String, String>> {
    let fields: Vec<String> = catalog
        .persistent_fields(record.type_name())?
        .into_iter()
        .map(|f| f.field_name.clone())
        .collect();
    Ok(build_map_values_for(record, &fields))
}

/// Flatten the named fields of a record into string values
///
/// Absent values are skipped. Coded references contribute their key and
/// entity references their identity, when set. For a collection every
/// non-null element is written to the same key, so the last element wins.
pub fn build_map_values_for<S: AsRef<str>>(record: &dyn Record, fields: &[S]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();

    for field in fields {
        let field = field.as_ref();
        match resolve_nullable(record, field) {
            FieldValue::List(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    if let Some(value) = element_value(item) {
                        map.insert(field.to_string(), value);
                    }
                }
            }
            value => {
                if let Some(value) = scalar_value(&value) {
                    map.insert(field.to_string(), value);
                }
            }
        }
    }

    map
}

/// Percent-encoded `key=value` pairs of a record's persistent fields
pub fn build_url_parameters(catalog: &dyn MetadataCatalog, record: &dyn Record) -> AuditLensResult<String> {
    Ok(encode_parameters(&build_map_values(catalog, record)?))
}

/// Join a parameter map as `key=value&...`; empty for an empty map
pub fn encode_parameters(map: &BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                key,
                url::form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>()
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn scalar_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Code(code) => code.has_key().then(|| code.key.clone()),
        FieldValue::Entity(record) => record.identity().map(|id| id.to_string()),
        other => other.canonical_string().filter(|s| !s.trim().is_empty()),
    }
}

fn element_value(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Code(_) | FieldValue::Entity(_) => scalar_value(value),
        other => other.canonical_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodedReference, FieldMap};
    use crate::test_fixtures::{ninja_catalog, sample_ninja, Clan, Ninja};

    #[test]
    fn test_map_values_of_sample() {
        let catalog = ninja_catalog();
        let map = build_map_values(&catalog, &sample_ninja()).unwrap();

        assert_eq!(map.get("firstName").map(String::as_str), Some("Kai"));
        assert_eq!(map.get("age").map(String::as_str), Some("30"));
        assert_eq!(map.get("status").map(String::as_str), Some("STATUS_NEW"));
        assert_eq!(map.get("mainClan").map(String::as_str), Some("7"));
        assert_eq!(map.get("joinDate").map(String::as_str), Some("2024-03-09"));
        // Last element wins
        assert_eq!(map.get("skillSet").map(String::as_str), Some("SWORD"));
        // Transient fields are not included
        assert!(!map.contains_key("address"));
    }

    #[test]
    fn test_absent_and_unset_values_skipped() {
        let catalog = ninja_catalog();
        let mut ninja = Ninja::new("Jay", "");
        ninja.status = Some(CodedReference::new(""));
        ninja.main_clan = Some(Clan {
            id: None,
            name: "Unsaved".into(),
        });

        let map = build_map_values(&catalog, &ninja).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("firstName").map(String::as_str), Some("Jay"));
    }

    #[test]
    fn test_collection_of_entities_uses_identity() {
        let map = build_map_values_for(&sample_ninja(), &["subClans"]);
        assert_eq!(map.get("subClans").map(String::as_str), Some("9"));
    }

    #[test]
    fn test_url_parameters() {
        let record = FieldMap::new().with("name", "Bob Smith & Co").with("age", 30);
        let map = build_map_values_for(&record, &["name", "age"]);
        assert_eq!(encode_parameters(&map), "age=30&name=Bob+Smith+%26+Co");
    }

    #[test]
    fn test_url_parameters_empty() {
        let catalog = ninja_catalog();
        assert_eq!(build_url_parameters(&catalog, &Ninja::new("", "")).unwrap(), "");
    }
}
