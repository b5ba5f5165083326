//! Normalized values
//!
//! The canonical form the diff engine compares. Produced by
//! [`ValueNormalizer`](crate::normalize::ValueNormalizer).

use std::fmt;

/// Canonical comparison/rendering form of a field value
#[derive(Debug, Clone)]
pub enum NormalizedValue {
    Empty,
    Text(String),
    Sequence(Vec<NormalizedValue>),
}

/// Structural shape used to detect datatype mismatches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Empty,
    Scalar,
    Sequence,
}

impl NormalizedValue {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Empty => Shape::Empty,
            Self::Text(_) => Shape::Scalar,
            Self::Sequence(_) => Shape::Sequence,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Empty, or text made only of whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Sequence(_) => false,
        }
    }

    /// Empty is compatible with every shape; otherwise shapes must match
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        match (self.shape(), other.shape()) {
            (Shape::Empty, _) | (_, Shape::Empty) => true,
            (a, b) => a == b,
        }
    }

    /// Elements of a sequence; empty slice for anything else
    pub fn elements(&self) -> &[NormalizedValue] {
        match self {
            Self::Sequence(items) => items,
            _ => &[],
        }
    }

    /// Elements of `self` that `other` does not contain, in order
    pub fn difference(&self, other: &Self) -> Vec<NormalizedValue> {
        let theirs = other.elements();
        self.elements()
            .iter()
            .filter(|item| !theirs.contains(item))
            .cloned()
            .collect()
    }

    /// Render a slice of values the way sequences render
    pub fn render_all(items: &[NormalizedValue]) -> String {
        format!(
            "[{}]",
            items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl PartialEq for NormalizedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Text(a), Self::Text(b)) => a == b,
            // Membership equality: each side contains every element of the other
            (Self::Sequence(a), Self::Sequence(b)) => {
                a.iter().all(|item| b.contains(item)) && b.iter().all(|item| a.contains(item))
            }
            _ => false,
        }
    }
}

impl Eq for NormalizedValue {}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => write!(f, "{}", s),
            Self::Sequence(items) => write!(f, "{}", Self::render_all(items)),
        }
    }
}
