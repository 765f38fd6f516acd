// src/sink/csv_backup.rs
//! Compiled-table CSV written next to the raw responses before loading,
//! and read back when a load has to be repeated from it.

use crate::error::AppError;
use crate::model::{Cell, Column, ParsedRecord, PropertyTable, SinkType};
use crate::types::PropertyId;
use std::path::Path;

/// Writes the table with a header row in column order. Null cells are
/// written as empty fields.
pub fn write_backup(path: &Path, table: &PropertyTable) -> Result<usize, AppError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(Column::ALL.iter().map(|c| c.name()))?;
    for record in table.rows() {
        writer.write_record(record.iter().map(|(_, cell)| cell.to_string()))?;
    }
    writer.flush()?;
    log::info!("Wrote {} rows to backup {}", table.len(), path.display());
    Ok(table.len())
}

/// Reads a backup written by [`write_backup`] into a table.
///
/// The header must list the columns in catalogue order. Numeric columns
/// read back as integers where the text allows it, floats otherwise; text
/// columns stay text so leading zeros in a ZIP survive.
pub fn read_backup(path: &Path) -> Result<PropertyTable, AppError> {
    let invalid = |reason: String| AppError::InvalidBackup {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let expected = Column::ALL.iter().map(|c| c.name());
    if headers.len() != Column::COUNT || !headers.iter().eq(expected) {
        return Err(invalid("header does not match the column catalogue".to_string()));
    }

    let mut table = PropertyTable::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let line = index + 2;
        let id = PropertyId::parse(&row[0]).map_err(|e| invalid(format!("line {}: {}", line, e)))?;
        let mut record = ParsedRecord::new(id);
        for (column, field) in Column::ALL.iter().zip(row.iter()).skip(1) {
            record.set(*column, cell_from_field(*column, field));
        }
        table.push(record);
    }

    log::info!("Read {} rows from backup {}", table.len(), path.display());
    Ok(table)
}

fn cell_from_field(column: Column, field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }
    match column.sink_type() {
        SinkType::VarChar(_) | SinkType::DateTime => Cell::text(field),
        _ => field
            .parse::<i64>()
            .map(Cell::Integer)
            .or_else(|_| field.parse::<f64>().map(Cell::Float))
            .unwrap_or_else(|_| Cell::text(field)),
    }
}
