//! Audit message data structures
//!
//! Defines the operation kinds and the rendered message handed back to
//! callers for storage in their own audit log.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Record was created
    Create,
    /// Record was updated
    Update,
    /// Record was deleted
    Delete,
}

impl Operation {
    /// CSS class of the message container
    pub fn container_class(&self) -> &'static str {
        match self {
            Operation::Create => "add-message",
            Operation::Update => "change-message",
            Operation::Delete => "delete-message",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A rendered audit message
///
/// The text is an HTML fragment. An empty update message means the record
/// was compared and nothing observable changed; callers should not persist
/// an audit row for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMessage {
    /// Operation the message describes
    pub operation: Operation,

    /// Rendered HTML fragment; may be empty
    pub text: String,
}

impl AuditMessage {
    pub fn new(operation: Operation, text: impl Into<String>) -> Self {
        Self {
            operation,
            text: text.into(),
        }
    }

    /// A message with no content
    pub fn empty(operation: Operation) -> Self {
        Self::new(operation, String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for AuditMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", Operation::Create), "CREATE");
        assert_eq!(format!("{}", Operation::Update), "UPDATE");
        assert_eq!(format!("{}", Operation::Delete), "DELETE");
    }

    #[test]
    fn test_container_classes() {
        assert_eq!(Operation::Create.container_class(), "add-message");
        assert_eq!(Operation::Update.container_class(), "change-message");
        assert_eq!(Operation::Delete.container_class(), "delete-message");
    }

    #[test]
    fn test_empty_message() {
        let message = AuditMessage::empty(Operation::Update);
        assert!(message.is_empty());
        assert_eq!(message.to_string(), "");
    }

    #[test]
    fn test_serialization() {
        let message = AuditMessage::new(Operation::Delete, "<p>x</p>");
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"operation\":\"delete\""));
        let back: AuditMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
