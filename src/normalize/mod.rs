// src/normalize/mod.rs
//! Column-wise type normalization ahead of the sink.
//!
//! Every column's [`Coercion`] decides what happens to its cells. Bad text
//! never fails the run: it becomes null and a warning names the property
//! and column.

pub mod amenities;
mod coercions;

pub use coercions::{count, currency, percentage, Coerced};

use crate::model::{Cell, Coercion, Column, ParsedRecord, PropertyTable};

/// Applies one column's coercion to a cell.
pub fn coerce(column: Column, cell: Cell) -> Coerced {
    match column.coercion() {
        Coercion::Currency => currency(cell),
        Coercion::Percentage => percentage(cell),
        Coercion::Count => count(cell),
        Coercion::Amenities => Ok(match cell {
            Cell::Text(list) => Cell::Text(amenities::shrink(&list)),
            other => other,
        }),
        Coercion::None => Ok(cell),
    }
}

/// Normalizes every column of one record.
pub fn normalize_record(mut record: ParsedRecord) -> ParsedRecord {
    let id = record.id();
    for column in Column::ALL {
        record.update(column, |cell| match coerce(column, cell) {
            Ok(cell) => cell,
            Err(text) => {
                log::warn!(
                    "Property {}: '{}' is not a valid {} value, storing null",
                    id,
                    text,
                    column
                );
                Cell::Null
            }
        });
    }
    record
}

/// Normalizes every row of the table.
pub fn normalize_table(table: PropertyTable) -> PropertyTable {
    table.into_iter().map(normalize_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyId;

    #[test]
    fn test_normalize_record_by_column_kind() {
        let mut record = ParsedRecord::new(PropertyId::new(1));
        record.set(Column::OneBedroomAskingRentUnit, Cell::text("$1,234"));
        record.set(Column::OneBedroomConcessionsPercentage, Cell::text("87.5%"));
        record.set(Column::OneBedroomAvgSf, Cell::text("-"));
        record.set(Column::NumberOfUnits, Cell::text("2,048"));
        record.set(Column::Zip, Cell::text("80202"));
        record.set(Column::Amenities, Cell::text("Washer/Dryer; Pool"));

        let record = normalize_record(record);
        assert_eq!(record.get(Column::OneBedroomAskingRentUnit), &Cell::Integer(1234));
        assert_eq!(
            record.get(Column::OneBedroomConcessionsPercentage),
            &Cell::Float(87.5)
        );
        assert_eq!(record.get(Column::OneBedroomAvgSf), &Cell::Null);
        assert_eq!(record.get(Column::NumberOfUnits), &Cell::Integer(2048));
        assert_eq!(record.get(Column::Zip), &Cell::text("80202"));
        assert_eq!(record.get(Column::Amenities), &Cell::text("W/D; Pool"));
    }

    #[test]
    fn test_unparseable_text_becomes_null() {
        let mut record = ParsedRecord::new(PropertyId::new(1));
        record.set(Column::StudioEffectiveRentUnit, Cell::text("$call"));
        let record = normalize_record(record);
        assert!(record.get(Column::StudioEffectiveRentUnit).is_null());
    }

    #[test]
    fn test_normalize_is_stable() {
        let mut record = ParsedRecord::new(PropertyId::new(1));
        record.set(Column::TwoBedroomAskingRentUnit, Cell::text("$2,100"));
        let once = normalize_record(record);
        let twice = normalize_record(once.clone());
        assert_eq!(once, twice);
    }
}
