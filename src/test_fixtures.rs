//! Shared fixtures for unit tests
//!
//! A small typed domain (ninjas, clans, addresses) implementing `Record` by
//! hand, plus the catalog describing it.

use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::StaticCatalog;
use crate::models::{
    AccessError, CodedReference, FieldDescriptor, FieldValue, Identity, Record, TypeMetadata,
    ValueKind,
};

#[derive(Debug, Clone, Default)]
pub struct Address {
    pub street: String,
    pub zip: String,
}

impl Record for Address {
    fn type_name(&self) -> &str {
        "Address"
    }

    fn read(&self, field: &str) -> Result<FieldValue, AccessError> {
        match field {
            "street" => Ok(self.street.clone().into()),
            "zip" => Ok(self.zip.clone().into()),
            _ => Err(AccessError::no_such_field(field)),
        }
    }

    fn declared_kind(&self, field: &str) -> Option<ValueKind> {
        match field {
            "street" | "zip" => Some(ValueKind::Text),
            _ => None,
        }
    }

    fn label(&self) -> String {
        format!("{} {}", self.street, self.zip)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clan {
    pub id: Option<Identity>,
    pub name: String,
}

impl Clan {
    pub fn new(id: Identity, name: &str) -> Self {
        Self {
            id: Some(id),
            name: name.to_string(),
        }
    }
}

impl Record for Clan {
    fn type_name(&self) -> &str {
        "Clan"
    }

    fn identity(&self) -> Option<Identity> {
        self.id
    }

    fn read(&self, field: &str) -> Result<FieldValue, AccessError> {
        match field {
            "id" => Ok(self.id.into()),
            "name" => Ok(self.name.clone().into()),
            _ => Err(AccessError::no_such_field(field)),
        }
    }

    fn declared_kind(&self, field: &str) -> Option<ValueKind> {
        match field {
            "id" => Some(ValueKind::Integer),
            "name" => Some(ValueKind::Text),
            _ => None,
        }
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ninja {
    pub id: Option<Identity>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub active: Option<bool>,
    pub selling_price: Option<f64>,
    pub join_date: Option<NaiveDate>,
    pub next_fight: Option<DateTime<Utc>>,
    pub status: Option<CodedReference>,
    pub skill_set: Vec<CodedReference>,
    pub main_clan: Option<Clan>,
    pub sub_clans: Vec<Clan>,
    pub address: Option<Address>,
    pub tags: Vec<String>,
    pub kind: Option<String>,
    pub comments_loaded: bool,
}

impl Ninja {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            comments_loaded: true,
            ..Self::default()
        }
    }
}

impl Record for Ninja {
    fn type_name(&self) -> &str {
        "Ninja"
    }

    fn identity(&self) -> Option<Identity> {
        self.id
    }

    fn read(&self, field: &str) -> Result<FieldValue, AccessError> {
        let value: FieldValue = match field {
            "id" => self.id.into(),
            "firstName" => self.first_name.clone().into(),
            "lastName" => self.last_name.clone().into(),
            "email" => self.email.clone().into(),
            "age" => self.age.into(),
            "active" => self.active.into(),
            "sellingPrice" => self.selling_price.into(),
            "joinDate" => self.join_date.into(),
            "nextFight" => self.next_fight.into(),
            "status" => self.status.clone().into(),
            "skillSet" => self.skill_set.clone().into(),
            "mainClan" => self
                .main_clan
                .clone()
                .map_or(FieldValue::Null, FieldValue::entity),
            "subClans" => FieldValue::List(
                self.sub_clans.iter().cloned().map(FieldValue::entity).collect(),
            ),
            "address" => self
                .address
                .clone()
                .map_or(FieldValue::Null, FieldValue::record),
            "tags" => self.tags.clone().into(),
            "kind" => self.kind.clone().map_or(FieldValue::Null, FieldValue::Type),
            "comments" if self.comments_loaded => FieldValue::List(Vec::new()),
            "comments" => FieldValue::Unloaded,
            "avatar" => {
                return Err(AccessError::Failed {
                    field: field.to_string(),
                    reason: "upload store offline".to_string(),
                })
            }
            _ => return Err(AccessError::no_such_field(field)),
        };
        Ok(value)
    }

    fn declared_kind(&self, field: &str) -> Option<ValueKind> {
        let kind = match field {
            "id" | "age" => ValueKind::Integer,
            "firstName" | "lastName" | "email" => ValueKind::Text,
            "active" => ValueKind::Boolean,
            "sellingPrice" => ValueKind::Float,
            "joinDate" => ValueKind::Date,
            "nextFight" => ValueKind::Timestamp,
            "status" => ValueKind::Code,
            "skillSet" => ValueKind::List(Box::new(ValueKind::Code)),
            "mainClan" => ValueKind::Entity("Clan".into()),
            "subClans" => ValueKind::List(Box::new(ValueKind::Entity("Clan".into()))),
            "address" => ValueKind::Record("Address".into()),
            "tags" => ValueKind::List(Box::new(ValueKind::Text)),
            "kind" => ValueKind::Type,
            _ => return None,
        };
        Some(kind)
    }
}

/// A fully populated ninja
pub fn sample_ninja() -> Ninja {
    Ninja {
        id: Some(42),
        email: Some("kai@ninjago.org".into()),
        age: Some(30),
        active: Some(true),
        join_date: NaiveDate::from_ymd_opt(2024, 3, 9),
        status: Some(CodedReference::with_value("STATUS_NEW", "New")),
        skill_set: vec![CodedReference::new("FIRE"), CodedReference::new("SWORD")],
        main_clan: Some(Clan::new(7, "Fire Temple")),
        sub_clans: vec![Clan::new(8, "Elemental"), Clan::new(9, "Spinjitzu")],
        address: Some(Address {
            street: "1 Monastery Rd".into(),
            zip: "90210".into(),
        }),
        tags: vec!["red".into(), "hero".into()],
        ..Ninja::new("Kai", "Smith")
    }
}

/// Catalog for the fixture domain
pub fn ninja_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_type(
            TypeMetadata::new("Ninja")
                .with_field(FieldDescriptor::new("firstName").titled("Name").primary().searchable())
                .with_field(FieldDescriptor::new("lastName").auditable().searchable())
                .with_field(
                    FieldDescriptor::new("email")
                        .titled("Email Address")
                        .auditable()
                        .searchable(),
                )
                .with_field(FieldDescriptor::new("age").auditable().searchable())
                .with_field(FieldDescriptor::new("active").auditable().searchable())
                .with_field(FieldDescriptor::new("joinDate").auditable())
                .with_field(FieldDescriptor::new("status").auditable().searchable())
                .with_field(FieldDescriptor::new("skillSet").auditable().searchable())
                .with_field(
                    FieldDescriptor::new("mainClan")
                        .titled("Clan")
                        .auditable()
                        .searchable(),
                )
                .with_field(FieldDescriptor::new("address").transient())
                .with_field(FieldDescriptor::new("kind").searchable()),
        )
        .and_then(|catalog| {
            catalog.with_type(
                TypeMetadata::new("Clan")
                    .with_field(FieldDescriptor::new("name").primary().auditable()),
            )
        })
        .and_then(|catalog| {
            catalog.with_type(
                TypeMetadata::new("Address")
                    .not_auditable()
                    .with_field(FieldDescriptor::new("street"))
                    .with_field(FieldDescriptor::new("zip")),
            )
        })
        .expect("fixture catalog is valid")
}
