// src/model/record.rs
//! Cells and the flat per-property record.

use super::Column;
use crate::types::PropertyId;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// A single table value. `Null` is the canonical "no value" marker and is
/// distinct from zero and from the empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Cell {
    /// Maps a JSON leaf onto a cell. Containers and `null` become `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            Value::Bool(b) => Self::Integer(i64::from(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => Self::Null,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    /// Renders the cell the way the CSV backup stores it; `Null` is empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

/// All business columns extracted from one raw response.
///
/// Every column is present from construction on, so a record is
/// schema-complete no matter how much of the response was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    id: PropertyId,
    cells: IndexMap<Column, Cell>,
}

impl ParsedRecord {
    /// A record with the identifier filled in and every other column null.
    pub fn new(id: PropertyId) -> Self {
        let mut cells: IndexMap<Column, Cell> =
            Column::ALL.iter().map(|c| (*c, Cell::Null)).collect();
        cells.insert(Column::PropertyId, Cell::Integer(id.as_i64()));
        Self { id, cells }
    }

    pub fn id(&self) -> PropertyId {
        self.id
    }

    pub fn get(&self, column: Column) -> &Cell {
        // Construction inserts every column, so the lookup cannot miss.
        self.cells.get(&column).unwrap_or(&Cell::Null)
    }

    pub fn set(&mut self, column: Column, cell: Cell) {
        self.cells.insert(column, cell);
    }

    /// Applies `f` to one cell in place.
    pub fn update(&mut self, column: Column, f: impl FnOnce(Cell) -> Cell) {
        if let Some(slot) = self.cells.get_mut(&column) {
            *slot = f(std::mem::take(slot));
        }
    }

    /// Cells in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &Cell)> {
        self.cells.iter().map(|(c, v)| (*c, v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
