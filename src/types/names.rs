use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,127}$").expect("table name pattern is valid")
});

/// Target table in the sink. Interpolated into SQL, so only plain
/// identifiers are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("table name"));
        }
        if !TABLE_NAME.is_match(trimmed) {
            return Err(ValidationError::InvalidTableName {
                name: name.clone(),
                reason: "only letters, digits and underscores are allowed".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
