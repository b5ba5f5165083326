//! Query-by-example clause building
//!
//! Turns the populated searchable fields of an example record into a
//! ` where ...` filter fragment.

use crate::catalog::MetadataCatalog;
use crate::config::EngineSettings;
use crate::error::AuditLensResult;
use crate::models::{FieldValue, Record};
use crate::resolver::resolve_nullable;

use super::escape::escape_sql;

/// Builds filter clauses from example records
pub struct QueryBuilder<'a> {
    catalog: &'a dyn MetadataCatalog,
    settings: EngineSettings,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(catalog: &'a dyn MetadataCatalog) -> Self {
        Self::with_settings(catalog, &EngineSettings::default())
    }

    pub fn with_settings(catalog: &'a dyn MetadataCatalog, settings: &EngineSettings) -> Self {
        Self {
            catalog,
            settings: settings.clone(),
        }
    }

    /// Build the filter for an example record
    ///
    /// Text fields match by substring unless `exact_match` is set. Returns an
    /// empty string when no searchable field carries a value; callers must
    /// then omit the filter entirely.
    pub fn build_query_clause(&self, example: &dyn Record, exact_match: bool) -> AuditLensResult<String> {
        let mut predicates = Vec::new();

        for field in self.catalog.searchable_fields(example.type_name())? {
            let value = resolve_nullable(example, &field.field_name);
            if let Some(predicate) = self.predicate(&field.field_name, &value, exact_match) {
                predicates.push(predicate);
            }
        }

        if predicates.is_empty() {
            return Ok(String::new());
        }
        Ok(format!(" where {}", predicates.join(" and ")))
    }

    fn predicate(&self, field_name: &str, value: &FieldValue, exact_match: bool) -> Option<String> {
        let column = self.settings.qualify(field_name);
        match value {
            FieldValue::Null => None,
            FieldValue::List(items) if items.is_empty() => None,
            FieldValue::Map(map) if map.is_empty() => None,
            FieldValue::Text(s) if s.trim().is_empty() => None,
            FieldValue::Text(s) if !exact_match => Some(format!(
                "{} LIKE '%{}%' ESCAPE '\\'",
                column,
                escape_sql(s, true)
            )),
            FieldValue::Code(code) if !code.has_key() => None,
            FieldValue::Code(code) => Some(format!("{}.key = '{}'", column, escape_sql(&code.key, false))),
            FieldValue::Entity(record) => record
                .identity()
                .map(|id| format!("{}.id = {}", column, id)),
            FieldValue::Integer(n) => Some(format!("{} = {}", column, n)),
            FieldValue::Float(n) => Some(format!("{} = {}", column, n)),
            FieldValue::Boolean(b) => Some(format!("{} = {}", column, b)),
            FieldValue::Type(name) => Some(format!("{} = '{}'", column, escape_sql(name, false))),
            FieldValue::List(_) | FieldValue::Map(_) | FieldValue::Unloaded => {
                tracing::warn!(
                    field = %field_name,
                    "Unsupported search on collection-valued field; predicate dropped"
                );
                None
            }
            other => other
                .canonical_string()
                .filter(|s| !s.trim().is_empty())
                .map(|s| format!("{} = '{}'", column, escape_sql(&s, false))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::models::{CodedReference, FieldDescriptor, FieldMap, TypeMetadata};
    use crate::test_fixtures::{ninja_catalog, Clan, Ninja};

    fn map_catalog(fields: &[&str]) -> StaticCatalog {
        let mut meta = TypeMetadata::new("Map");
        for (i, name) in fields.iter().enumerate() {
            let mut field = FieldDescriptor::new(*name).searchable();
            if i == 0 {
                field = field.primary();
            }
            meta = meta.with_field(field);
        }
        StaticCatalog::new().with_type(meta).unwrap()
    }

    #[test]
    fn test_empty_example_gives_empty_clause() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let clause = builder.build_query_clause(&Ninja::new("", ""), false).unwrap();
        assert_eq!(clause, "");
    }

    #[test]
    fn test_like_clause() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let clause = builder.build_query_clause(&Ninja::new("Kai", ""), false).unwrap();
        assert_eq!(clause, " where obj.firstName LIKE '%Kai%' ESCAPE '\\'");
    }

    #[test]
    fn test_exact_clause() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let clause = builder.build_query_clause(&Ninja::new("Kai", ""), true).unwrap();
        assert_eq!(clause, " where obj.firstName = 'Kai'");
    }

    #[test]
    fn test_quote_escaped() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let clause = builder
            .build_query_clause(&Ninja::new("", "O'Brien"), false)
            .unwrap();
        assert_eq!(clause, " where obj.lastName LIKE '%O''Brien%' ESCAPE '\\'");
    }

    #[test]
    fn test_typed_predicates() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let mut ninja = Ninja::new("", "");
        ninja.age = Some(30);
        ninja.active = Some(false);
        ninja.status = Some(CodedReference::new("STATUS_NEW"));
        ninja.main_clan = Some(Clan::new(7, "Fire Temple"));
        ninja.kind = Some("org.ninjago.Master".into());

        let clause = builder.build_query_clause(&ninja, false).unwrap();
        assert_eq!(
            clause,
            " where obj.age = 30 and obj.active = false and obj.status.key = 'STATUS_NEW' \
             and obj.mainClan.id = 7 and obj.kind = 'org.ninjago.Master'"
        );
    }

    #[test]
    fn test_unassigned_entity_and_blank_code_skipped() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let mut ninja = Ninja::new("", "");
        ninja.status = Some(CodedReference::new(""));
        ninja.main_clan = Some(Clan {
            id: None,
            name: "Unsaved".into(),
        });

        assert_eq!(builder.build_query_clause(&ninja, false).unwrap(), "");
    }

    #[test]
    fn test_collection_field_dropped() {
        let catalog = ninja_catalog();
        let builder = QueryBuilder::new(&catalog);
        let mut ninja = Ninja::new("Kai", "");
        ninja.skill_set = vec![CodedReference::new("FIRE")];

        let clause = builder.build_query_clause(&ninja, true).unwrap();
        assert_eq!(clause, " where obj.firstName = 'Kai'");
    }

    #[test]
    fn test_date_uses_quoted_literal() {
        let catalog = map_catalog(&["name", "born"]);
        let builder = QueryBuilder::new(&catalog);
        let example = FieldMap::new().with(
            "born",
            chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        );
        assert_eq!(
            builder.build_query_clause(&example, false).unwrap(),
            " where obj.born = '2024-03-09'"
        );
    }

    #[test]
    fn test_empty_alias() {
        let catalog = map_catalog(&["name"]);
        let settings = EngineSettings {
            query_alias: String::new(),
            ..EngineSettings::default()
        };
        let builder = QueryBuilder::with_settings(&catalog, &settings);
        let example = FieldMap::new().with("name", "Bob");
        assert_eq!(
            builder.build_query_clause(&example, true).unwrap(),
            " where name = 'Bob'"
        );
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let catalog = StaticCatalog::new();
        let builder = QueryBuilder::new(&catalog);
        let err = builder.build_query_clause(&Ninja::new("Kai", ""), false).unwrap_err();
        assert!(err.is_unknown_type());
    }
}
