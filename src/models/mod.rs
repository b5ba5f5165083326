//! Core data models for AuditLens
//!
//! This module contains the data structures the engine works on: the record
//! abstraction, classified field values, normalized values, coded references
//! and catalog descriptors.

pub mod coded;
pub mod descriptor;
pub mod normalized;
pub mod record;
pub mod value;

pub use coded::CodedReference;
pub use descriptor::{humanize, FieldDescriptor, TypeMetadata};
pub use normalized::{NormalizedValue, Shape};
pub use record::{field_name_for_accessor, AccessError, FieldMap, Identity, Record};
pub use value::{FieldValue, ValueKind};
