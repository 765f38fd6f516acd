// src/sink/schema.rs
//! SQL text for the property table. Pure string building.

use crate::model::{Column, COLLECTED_DATE_STAMP, MOST_RECENT_FLAG};
use crate::types::TableName;

/// Column names in load order: the 45 business columns then the two
/// load-time columns.
pub fn load_columns() -> Vec<&'static str> {
    Column::ALL
        .iter()
        .map(|c| c.name())
        .chain([COLLECTED_DATE_STAMP, MOST_RECENT_FLAG])
        .collect()
}

pub fn create_table(table: &TableName) -> String {
    let mut definitions: Vec<String> = Column::ALL
        .iter()
        .map(|c| format!("    \"{}\" {}", c.name(), c.sink_type().sql()))
        .collect();
    definitions.push(format!("    \"{}\" DATETIME", COLLECTED_DATE_STAMP));
    definitions.push(format!("    \"{}\" INTEGER", MOST_RECENT_FLAG));
    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" (\n{}\n)",
        table,
        definitions.join(",\n")
    )
}

pub fn clear_current_flag(table: &TableName) -> String {
    format!(
        "UPDATE \"{table}\" SET \"{flag}\" = 0 WHERE \"{flag}\" = 1 AND \"{id}\" = ?1",
        table = table,
        flag = MOST_RECENT_FLAG,
        id = Column::PropertyId.name()
    )
}

pub fn insert_row(table: &TableName) -> String {
    let columns = load_columns();
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let names = columns
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO \"{}\" ({}) VALUES ({})", table, names, placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableName {
        TableName::new("PropertyExport").unwrap()
    }

    #[test]
    fn test_create_table_declares_all_columns() {
        let sql = create_table(&table());
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"PropertyExport\""));
        assert!(sql.contains("\"CoStarPropertyID\" BIGINT"));
        assert!(sql.contains("\"StudioEffectiveRentUnit\" FLOAT"));
        assert!(sql.contains("\"State\" VARCHAR(2)"));
        assert!(sql.contains("\"MostRecentFlag\" INTEGER"));
        assert_eq!(sql.matches(",\n").count(), Column::COUNT + 1);
    }

    #[test]
    fn test_insert_has_one_placeholder_per_column() {
        let sql = insert_row(&table());
        assert_eq!(load_columns().len(), 47);
        assert!(sql.contains("?47)"));
        assert!(!sql.contains("?48"));
    }
}
