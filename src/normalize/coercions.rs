// src/normalize/coercions.rs
//! Display-format text to sink types.
//!
//! Each coercion passes through nulls and values that are already numeric.
//! Text too short to carry a symbol is left untouched. Text that still
//! does not parse after stripping comes back as `Err(original)` so the
//! caller can log it with the record's context.

use crate::model::Cell;

/// Outcome of coercing one cell.
pub type Coerced = Result<Cell, String>;

/// `"$1,234"` → `1234`. Text of three characters or fewer passes through.
pub fn currency(cell: Cell) -> Coerced {
    match cell {
        Cell::Text(text) if text.chars().count() > 3 => {
            let digits: String = text.chars().skip(1).filter(|c| *c != ',').collect();
            parse_integer(&digits).ok_or(text)
        }
        other => Ok(other),
    }
}

/// `"12.5%"` → `12.5`. A single character passes through.
pub fn percentage(cell: Cell) -> Coerced {
    match cell {
        Cell::Text(text) if text.chars().count() > 1 => {
            let mut chars = text.chars();
            chars.next_back();
            chars
                .as_str()
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Cell::Float)
                .ok_or(text)
        }
        other => Ok(other),
    }
}

/// `"1,024"` → `1024`; the `"-"` placeholder becomes null.
pub fn count(cell: Cell) -> Coerced {
    match cell {
        Cell::Text(text) if text.trim() == "-" => Ok(Cell::Null),
        Cell::Text(text) => {
            let digits: String = text.chars().filter(|c| *c != ',').collect();
            parse_integer(&digits).ok_or(text)
        }
        other => Ok(other),
    }
}

fn parse_integer(digits: &str) -> Option<Cell> {
    digits.trim().parse::<i64>().ok().map(Cell::Integer)
}
