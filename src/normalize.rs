//! Value normalization
//!
//! Maps classified field values to the canonical form the diff engine
//! compares and renders: absent values and empty collections become
//! `Empty`, dates become formatted text, collections become sequences and
//! everything else becomes its canonical text.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt::Write;

use crate::config::EngineSettings;
use crate::models::{FieldValue, NormalizedValue};

/// Converts field values into [`NormalizedValue`]s
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    date_pattern: String,
    datetime_pattern: String,
}

impl Default for ValueNormalizer {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}

impl ValueNormalizer {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            date_pattern: settings.date_pattern.clone(),
            datetime_pattern: settings.datetime_pattern.clone(),
        }
    }

    /// Normalize one field value
    pub fn normalize(&self, value: &FieldValue) -> NormalizedValue {
        match value {
            FieldValue::Null | FieldValue::Unloaded => NormalizedValue::Empty,
            FieldValue::Text(s) if s.is_empty() => NormalizedValue::Empty,
            FieldValue::List(items) if items.is_empty() => NormalizedValue::Empty,
            FieldValue::Map(map) if map.is_empty() => NormalizedValue::Empty,
            FieldValue::List(items) => {
                let elements: Vec<_> = items
                    .iter()
                    .map(|item| self.normalize(item))
                    .filter(|item| *item != NormalizedValue::Empty)
                    .collect();
                if elements.is_empty() {
                    NormalizedValue::Empty
                } else {
                    NormalizedValue::Sequence(elements)
                }
            }
            FieldValue::Date(date) => NormalizedValue::Text(self.format_date(*date)),
            FieldValue::Timestamp(ts) => NormalizedValue::Text(self.format_timestamp(ts)),
            other => match other.canonical_string() {
                Some(s) => NormalizedValue::Text(s),
                None => NormalizedValue::Empty,
            },
        }
    }

    /// Format a date with the date-only pattern
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_pattern)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }

    /// Format a timestamp; midnight values carry no time of day and use the date pattern
    pub fn format_timestamp(&self, ts: &DateTime<Utc>) -> String {
        if ts.time() == NaiveTime::MIN {
            return self.format_date(ts.date_naive());
        }
        let mut out = String::new();
        if write!(out, "{}", ts.format(&self.datetime_pattern)).is_err() {
            return ts.to_rfc3339();
        }
        out
    }
}
