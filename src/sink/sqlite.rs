// src/sink/sqlite.rs
//! SQLite implementation of the table sink.

use super::{schema, LoadReport, TableSink};
use crate::error::AppError;
use crate::model::{Cell, Column, PropertyTable, MOST_RECENT_FLAG};
use crate::types::{PropertyId, TableName};
use chrono::NaiveDateTime;
use rusqlite::types::{ToSqlOutput, Value as SqlValue};
use rusqlite::{params, Connection, ToSql};
use std::collections::BTreeSet;
use std::path::Path;

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Null => ToSqlOutput::Owned(SqlValue::Null),
            Cell::Text(s) => ToSqlOutput::from(s.as_str()),
            Cell::Integer(i) => ToSqlOutput::from(*i),
            Cell::Float(f) => ToSqlOutput::from(*f),
        })
    }
}

/// Appends runs to one SQLite table, keeping `MostRecentFlag` current.
pub struct SqliteSink {
    conn: Connection,
    table: TableName,
}

impl SqliteSink {
    pub fn open(path: &Path, table: TableName) -> Result<Self, AppError> {
        log::info!("Opening sink database {}", path.display());
        let conn = Connection::open(path)?;
        Ok(Self { conn, table })
    }

    pub fn in_memory(table: TableName) -> Result<Self, AppError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            table,
        })
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of rows currently flagged as most recent for `id`.
    pub fn current_row_count(&self, id: PropertyId) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM \"{}\" WHERE \"{}\" = 1 AND \"{}\" = ?1",
            self.table,
            MOST_RECENT_FLAG,
            Column::PropertyId.name()
        );
        let count = self
            .conn
            .query_row(&sql, params![id.as_i64()], |row| row.get(0))?;
        Ok(count)
    }
}

impl TableSink for SqliteSink {
    fn load(
        &mut self,
        table: &PropertyTable,
        collected_at: NaiveDateTime,
    ) -> Result<LoadReport, AppError> {
        let tx = self.conn.transaction()?;
        tx.execute(&schema::create_table(&self.table), [])?;

        let ids: BTreeSet<PropertyId> = table.ids().into_iter().collect();
        let mut flags_cleared = 0;
        {
            let mut clear = tx.prepare(&schema::clear_current_flag(&self.table))?;
            for id in &ids {
                flags_cleared += clear.execute(params![id.as_i64()])?;
            }
        }

        let mut rows_inserted = 0;
        {
            let mut insert = tx.prepare(&schema::insert_row(&self.table))?;
            for record in table.rows() {
                let mut values: Vec<&dyn ToSql> = record
                    .iter()
                    .map(|(_, cell)| cell as &dyn ToSql)
                    .collect();
                values.push(&collected_at);
                values.push(&1_i64);
                rows_inserted += insert.execute(values.as_slice())?;
            }
        }

        tx.commit()?;
        log::info!(
            "Loaded {} rows into {} ({} previous rows no longer current)",
            rows_inserted,
            self.table,
            flags_cleared
        );
        Ok(LoadReport {
            rows_inserted,
            flags_cleared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParsedRecord;
    use chrono::NaiveDate;

    fn stamp(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn table(ids: &[u64]) -> PropertyTable {
        ids.iter()
            .map(|id| {
                let mut record = ParsedRecord::new(PropertyId::new(*id));
                record.set(Column::City, Cell::text("Austin"));
                record.set(Column::Latitude, Cell::Float(30.27));
                record
            })
            .collect()
    }

    #[test]
    fn test_reload_keeps_one_current_row_per_property() {
        let mut sink = SqliteSink::in_memory(TableName::new("PropertyExport").unwrap()).unwrap();

        let first = sink.load(&table(&[1, 2]), stamp(1)).unwrap();
        assert_eq!(first.rows_inserted, 2);
        assert_eq!(first.flags_cleared, 0);

        let second = sink.load(&table(&[2, 3]), stamp(2)).unwrap();
        assert_eq!(second.flags_cleared, 1);

        for id in [1, 2, 3] {
            assert_eq!(sink.current_row_count(PropertyId::new(id)).unwrap(), 1);
        }
        let total: i64 = sink
            .connection()
            .query_row("SELECT COUNT(*) FROM \"PropertyExport\"", [], |r| r.get(0))
            .unwrap();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_null_cells_are_stored_as_null() {
        let mut sink = SqliteSink::in_memory(TableName::new("Props").unwrap()).unwrap();
        sink.load(&table(&[9]), stamp(3)).unwrap();
        let zip: Option<String> = sink
            .connection()
            .query_row("SELECT \"Zip\" FROM \"Props\"", [], |r| r.get(0))
            .unwrap();
        assert_eq!(zip, None);
    }
}
