//! Coded reference model
//!
//! A lookup-table entry (status codes, skill sets, categories) identified by
//! a stable key. Coded references are compared and rendered by key only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A stable-key lookup value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodedReference {
    /// Stable key (e.g., "STATUS_NEW")
    pub key: String,

    /// Optional display value; never used for comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl CodedReference {
    /// Create a coded reference with just a key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Create a coded reference with a key and a display value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Returns true if the key is not blank
    pub fn has_key(&self) -> bool {
        !self.key.trim().is_empty()
    }
}

impl PartialEq for CodedReference {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CodedReference {}

impl Hash for CodedReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for CodedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
