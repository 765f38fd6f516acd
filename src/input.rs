// src/input.rs
//! Loading the property identifier list.

use crate::error::AppError;
use crate::types::PropertyId;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Header of the identifier column in the input CSV.
pub const ID_COLUMN: &str = "CoStarPropID";

pub fn load_property_ids(path: &Path) -> Result<Vec<PropertyId>, AppError> {
    let file = std::fs::File::open(path).map_err(|e| AppError::Storage {
        path: path.to_path_buf(),
        source: e,
    })?;
    let ids = read_property_ids(file)?;
    log::info!("Loaded {} property IDs from {}", ids.len(), path.display());
    Ok(ids)
}

/// Reads identifiers from CSV text, in file order.
///
/// Blank, `NaN` and otherwise invalid entries are dropped with a warning.
/// Repeated identifiers are kept once so each one owns a single raw file.
pub fn read_property_ids<R: Read>(reader: R) -> Result<Vec<PropertyId>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == ID_COLUMN)
        .ok_or_else(|| {
            AppError::MissingConfiguration(format!("input CSV has no '{}' column", ID_COLUMN))
        })?;

    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let line = index + 2;
        let raw = row.get(column).unwrap_or("");
        match PropertyId::parse(raw) {
            Ok(id) if seen.insert(id) => ids.push(id),
            Ok(id) => log::warn!("Line {}: duplicate property ID {} skipped", line, id),
            Err(e) => log::warn!("Line {}: {} skipped", line, e),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_and_filters_ids() {
        let csv = "PropertyName,CoStarPropID\n\
                   Lofts,12345.0\n\
                   Blank,\n\
                   Missing,NaN\n\
                   Tower,67890\n\
                   Again,12345\n\
                   Odd,abc\n";
        let ids = read_property_ids(csv.as_bytes()).unwrap();
        assert_eq!(ids, vec![PropertyId::new(12345), PropertyId::new(67890)]);
    }

    #[test]
    fn test_missing_column_is_configuration_error() {
        let err = read_property_ids("Name,Id\nA,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));
    }
}
