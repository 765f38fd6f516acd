// src/sink/mod.rs
//! Loading the normalized table into relational storage.
//!
//! A load stamps every row with the collection time and `MostRecentFlag = 1`
//! after flipping the previously current rows of the same properties to 0.

mod csv_backup;
pub mod schema;
mod sqlite;

pub use csv_backup::{read_backup, write_backup};
pub use sqlite::SqliteSink;

use crate::error::AppError;
use crate::model::PropertyTable;
use chrono::NaiveDateTime;

/// Outcome of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub rows_inserted: usize,
    pub flags_cleared: usize,
}

/// The ability to append a run's table to persistent storage.
pub trait TableSink {
    fn load(
        &mut self,
        table: &PropertyTable,
        collected_at: NaiveDateTime,
    ) -> Result<LoadReport, AppError>;
}
