// src/model/table.rs
//! The per-run table of records and the properties that could not join it.

use super::ParsedRecord;
use crate::types::PropertyId;
use std::fmt;

/// One record per successfully processed property.
///
/// Row order follows response completion order and is not stable across
/// runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTable {
    rows: Vec<ParsedRecord>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: ParsedRecord) {
        self.rows.push(record);
    }

    pub fn rows(&self) -> &[ParsedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ids(&self) -> Vec<PropertyId> {
        self.rows.iter().map(ParsedRecord::id).collect()
    }
}

impl FromIterator<ParsedRecord> for PropertyTable {
    fn from_iter<I: IntoIterator<Item = ParsedRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PropertyTable {
    type Item = ParsedRecord;
    type IntoIter = std::vec::IntoIter<ParsedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// A property that produced no row, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedProperty {
    pub id: PropertyId,
    pub cause: String,
}

impl fmt::Display for FailedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.cause)
    }
}
