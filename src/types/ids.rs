use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal key that uniquely identifies one property.
///
/// Input lists come out of spreadsheets, so the same key may arrive as
/// `"12345"`, `"12345.0"` or `" 12345 "`. All of these normalize to the
/// same identifier; blanks, `NaN` and fractional values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(u64);

impl PropertyId {
    /// Largest key the sink's signed BIGINT column can hold.
    pub const MAX: u64 = i64::MAX as u64;

    /// Wraps an already validated numeric key.
    pub const fn new(value: u64) -> Self {
        debug_assert!(value <= Self::MAX);
        Self(value)
    }

    /// Parses a raw cell from an input list.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("property id"));
        }

        if let Ok(value) = trimmed.parse::<u64>() {
            return Self::checked(value, input);
        }

        // Spreadsheet exports write integer columns with missing cells as floats.
        let float = trimmed
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidId(format!("not numeric: {}", input)))?;
        if !float.is_finite() || float.fract() != 0.0 || float < 0.0 || float > u64::MAX as f64 {
            return Err(ValidationError::InvalidId(format!(
                "not a whole property key: {}",
                input
            )));
        }
        Self::checked(float as u64, input)
    }

    fn checked(value: u64, input: &str) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::InvalidId(format!(
                "property key must be positive: {}",
                input
            )));
        }
        if value > Self::MAX {
            return Err(ValidationError::InvalidId(format!(
                "property key exceeds {}: {}",
                Self::MAX,
                input
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The key as stored in the sink; lossless because keys never exceed `MAX`.
    pub fn as_i64(&self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PropertyId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
