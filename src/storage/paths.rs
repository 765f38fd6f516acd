// src/storage/paths.rs
//! Pure functions for raw-response file naming.
//!
//! Nothing here touches the filesystem.

use crate::constants::{COLLECTION_DATE_FORMAT, RAW_RESPONSE_EXTENSION};
use crate::types::PropertyId;
use chrono::NaiveDate;

/// `<identifier>_<MM.DD.YYYY>.txt`
pub fn raw_file_name(id: PropertyId, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        id,
        date.format(COLLECTION_DATE_FORMAT),
        RAW_RESPONSE_EXTENSION
    )
}

/// `<MM.DD.YYYY>_compiled.csv`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}_compiled.csv", date.format(COLLECTION_DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_raw_file_name_layout() {
        assert_eq!(
            raw_file_name(PropertyId::new(10468325), date()),
            "10468325_03.07.2024.txt"
        );
        assert_eq!(backup_file_name(date()), "03.07.2024_compiled.csv");
    }
}
