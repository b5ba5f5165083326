//! Audit message engine
//!
//! Produces human-readable HTML descriptions of record creation, deletion
//! and modification, driven by the auditable fields a catalog declares.
//!
//! # Architecture
//!
//! - `Operation` / `AuditMessage`: the operation kind and the rendered fragment.
//! - `compare_field`: classifies one field as unchanged, changed, or the
//!   elements added to and removed from a collection.
//! - `AuditService`: resolves and normalizes field values and renders the
//!   create, update and delete messages.
//!
//! # Example
//!
//! ```rust,ignore
//! use auditlens::audit::AuditService;
//!
//! let service = AuditService::new(&catalog);
//! let message = service.build_update_message(&before, &after)?;
//! if !message.is_empty() {
//!     store.append(message.as_str());
//! }
//! ```

mod diff;
mod entry;
mod service;

pub use diff::{compare_field, DiffEntry, DiffKind};
pub use entry::{AuditMessage, Operation};
pub use service::AuditService;
