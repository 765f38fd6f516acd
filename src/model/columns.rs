// src/model/columns.rs
//! The fixed business schema of the property table.
//!
//! Column names and sink types are consumed by an existing table, so they
//! are reproduced exactly, including the oddities (studio effective rent is
//! stored as a float while the other bedroom categories are integers).

use super::{BedroomCategory, UnitMixMetric};
use std::fmt;

/// Storage type the sink declares for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkType {
    BigInt,
    Integer,
    Float,
    VarChar(usize),
    DateTime,
}

impl SinkType {
    /// SQL spelling of the type.
    pub fn sql(self) -> String {
        match self {
            Self::BigInt => "BIGINT".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::Float => "FLOAT".to_string(),
            Self::VarChar(len) => format!("VARCHAR({})", len),
            Self::DateTime => "DATETIME".to_string(),
        }
    }

    pub fn max_chars(self) -> Option<usize> {
        match self {
            Self::VarChar(len) => Some(len),
            _ => None,
        }
    }
}

/// How the normalizer treats a column's text cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// `"$1,234"` → `1234`
    Currency,
    /// `"12.5%"` → `12.5`
    Percentage,
    /// `"1,024"` → `1024`, `"-"` → null
    Count,
    /// Abbreviated and cut to fit the column.
    Amenities,
    /// Left as parsed.
    None,
}

/// One of the 45 business columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    PropertyId,
    PropertyName,
    PropertyAddress,
    OneBedroomAskingRentUnit,
    TwoBedroomAskingRentUnit,
    ThreeBedroomAskingRentUnit,
    FourBedroomAskingRentUnit,
    StudioAskingRentUnit,
    OneBedroomAvgSf,
    TwoBedroomAvgSf,
    ThreeBedroomAvgSf,
    FourBedroomAvgSf,
    StudioAvgSf,
    OneBedroomEffectiveRentUnit,
    TwoBedroomEffectiveRentUnit,
    ThreeBedroomEffectiveRentUnit,
    FourBedroomEffectiveRentUnit,
    StudioEffectiveRentUnit,
    OneBedroomUnits,
    TwoBedroomUnits,
    ThreeBedroomUnits,
    FourBedroomUnits,
    StudioUnits,
    NumberOfUnits,
    OneBedroomConcessionsPercentage,
    TwoBedroomConcessionsPercentage,
    ThreeBedroomConcessionsPercentage,
    FourBedroomConcessionsPercentage,
    StudioConcessionsPercentage,
    Latitude,
    Longitude,
    PropertyManagerName,
    TrueOwnerName,
    BuildingClass,
    StarRating,
    Amenities,
    YearBuilt,
    YearRenovated,
    ParkingSpaces,
    BuildingStories,
    PercentLeased,
    City,
    State,
    Zip,
    ConstructionStatus,
}

/// Column appended at load time with the collection timestamp.
pub const COLLECTED_DATE_STAMP: &str = "CollectedDateStamp";

/// Column appended at load time marking the current row per property.
pub const MOST_RECENT_FLAG: &str = "MostRecentFlag";

impl Column {
    pub const COUNT: usize = 45;

    pub const ALL: [Column; Column::COUNT] = [
        Self::PropertyId,
        Self::PropertyName,
        Self::PropertyAddress,
        Self::OneBedroomAskingRentUnit,
        Self::TwoBedroomAskingRentUnit,
        Self::ThreeBedroomAskingRentUnit,
        Self::FourBedroomAskingRentUnit,
        Self::StudioAskingRentUnit,
        Self::OneBedroomAvgSf,
        Self::TwoBedroomAvgSf,
        Self::ThreeBedroomAvgSf,
        Self::FourBedroomAvgSf,
        Self::StudioAvgSf,
        Self::OneBedroomEffectiveRentUnit,
        Self::TwoBedroomEffectiveRentUnit,
        Self::ThreeBedroomEffectiveRentUnit,
        Self::FourBedroomEffectiveRentUnit,
        Self::StudioEffectiveRentUnit,
        Self::OneBedroomUnits,
        Self::TwoBedroomUnits,
        Self::ThreeBedroomUnits,
        Self::FourBedroomUnits,
        Self::StudioUnits,
        Self::NumberOfUnits,
        Self::OneBedroomConcessionsPercentage,
        Self::TwoBedroomConcessionsPercentage,
        Self::ThreeBedroomConcessionsPercentage,
        Self::FourBedroomConcessionsPercentage,
        Self::StudioConcessionsPercentage,
        Self::Latitude,
        Self::Longitude,
        Self::PropertyManagerName,
        Self::TrueOwnerName,
        Self::BuildingClass,
        Self::StarRating,
        Self::Amenities,
        Self::YearBuilt,
        Self::YearRenovated,
        Self::ParkingSpaces,
        Self::BuildingStories,
        Self::PercentLeased,
        Self::City,
        Self::State,
        Self::Zip,
        Self::ConstructionStatus,
    ];

    /// Column name in the sink table.
    pub fn name(self) -> &'static str {
        match self {
            Self::PropertyId => "CoStarPropertyID",
            Self::PropertyName => "PropertyName",
            Self::PropertyAddress => "PropertyAddress",
            Self::OneBedroomAskingRentUnit => "OneBedroomAskingRentUnit",
            Self::TwoBedroomAskingRentUnit => "TwoBedroomAskingRentUnit",
            Self::ThreeBedroomAskingRentUnit => "ThreeBedroomAskingRentUnit",
            Self::FourBedroomAskingRentUnit => "FourBedroomAskingRentUnit",
            Self::StudioAskingRentUnit => "StudioAskingRentUnit",
            Self::OneBedroomAvgSf => "OneBedroomAvgSF",
            Self::TwoBedroomAvgSf => "TwoBedroomAvgSF",
            Self::ThreeBedroomAvgSf => "ThreeBedroomAvgSF",
            Self::FourBedroomAvgSf => "FourBedroomAvgSF",
            Self::StudioAvgSf => "StudioAvgSF",
            Self::OneBedroomEffectiveRentUnit => "OneBedroomEffectiveRentUnit",
            Self::TwoBedroomEffectiveRentUnit => "TwoBedroomEffectiveRentUnit",
            Self::ThreeBedroomEffectiveRentUnit => "ThreeBedroomEffectiveRentUnit",
            Self::FourBedroomEffectiveRentUnit => "FourBedroomEffectiveRentUnit",
            Self::StudioEffectiveRentUnit => "StudioEffectiveRentUnit",
            Self::OneBedroomUnits => "NumberOf1BedroomsUnits",
            Self::TwoBedroomUnits => "NumberOf2BedroomsUnits",
            Self::ThreeBedroomUnits => "NumberOf3BedroomsUnits",
            Self::FourBedroomUnits => "NumberOf4BedroomsUnits",
            Self::StudioUnits => "NumberOfStudioUnits",
            Self::NumberOfUnits => "NumberOfUnits",
            Self::OneBedroomConcessionsPercentage => "OneBedroomConcessionsPercentage",
            Self::TwoBedroomConcessionsPercentage => "TwoBedroomConcessionsPercentage",
            Self::ThreeBedroomConcessionsPercentage => "ThreeBedroomConcessionsPercentage",
            Self::FourBedroomConcessionsPercentage => "FourBedroomConcessionsPercentage",
            Self::StudioConcessionsPercentage => "StudioConcessionsPercentage",
            Self::Latitude => "Latitude",
            Self::Longitude => "Longitude",
            Self::PropertyManagerName => "PropertyManagerName",
            Self::TrueOwnerName => "TrueOwnerName",
            Self::BuildingClass => "BuildingClass",
            Self::StarRating => "StarRating",
            Self::Amenities => "Amenities",
            Self::YearBuilt => "YearBuilt",
            Self::YearRenovated => "YearRenovated",
            Self::ParkingSpaces => "ParkingSpaces",
            Self::BuildingStories => "BuildingStories",
            Self::PercentLeased => "PercentLeased",
            Self::City => "City",
            Self::State => "State",
            Self::Zip => "Zip",
            Self::ConstructionStatus => "ConstructionStatus",
        }
    }

    pub fn sink_type(self) -> SinkType {
        use SinkType::*;
        match self {
            Self::PropertyId | Self::StarRating | Self::ParkingSpaces | Self::BuildingStories => {
                BigInt
            }
            Self::PropertyName
            | Self::PropertyAddress
            | Self::PropertyManagerName
            | Self::TrueOwnerName
            | Self::BuildingClass
            | Self::Amenities
            | Self::ConstructionStatus => VarChar(250),
            Self::City => VarChar(100),
            Self::State => VarChar(2),
            Self::Zip => VarChar(10),
            Self::StudioEffectiveRentUnit
            | Self::OneBedroomConcessionsPercentage
            | Self::TwoBedroomConcessionsPercentage
            | Self::ThreeBedroomConcessionsPercentage
            | Self::FourBedroomConcessionsPercentage
            | Self::StudioConcessionsPercentage
            | Self::Latitude
            | Self::Longitude
            | Self::YearBuilt
            | Self::YearRenovated
            | Self::PercentLeased => Float,
            _ => Integer,
        }
    }

    pub fn coercion(self) -> Coercion {
        match self.bedroom_metric() {
            Some((_, UnitMixMetric::AskingRentPerUnit))
            | Some((_, UnitMixMetric::EffectiveRentPerUnit)) => Coercion::Currency,
            Some((_, UnitMixMetric::ConcessionPercentage)) => Coercion::Percentage,
            Some((_, UnitMixMetric::AverageArea)) | Some((_, UnitMixMetric::UnitCount)) => {
                Coercion::Count
            }
            None => match self {
                Self::NumberOfUnits => Coercion::Count,
                Self::Amenities => Coercion::Amenities,
                _ => Coercion::None,
            },
        }
    }

    /// The column holding `metric` for `category`.
    pub fn for_bedroom(category: BedroomCategory, metric: UnitMixMetric) -> Column {
        use BedroomCategory::*;
        use UnitMixMetric::*;
        match (metric, category) {
            (AskingRentPerUnit, Studio) => Self::StudioAskingRentUnit,
            (AskingRentPerUnit, OneBed) => Self::OneBedroomAskingRentUnit,
            (AskingRentPerUnit, TwoBed) => Self::TwoBedroomAskingRentUnit,
            (AskingRentPerUnit, ThreeBed) => Self::ThreeBedroomAskingRentUnit,
            (AskingRentPerUnit, FourBed) => Self::FourBedroomAskingRentUnit,
            (AverageArea, Studio) => Self::StudioAvgSf,
            (AverageArea, OneBed) => Self::OneBedroomAvgSf,
            (AverageArea, TwoBed) => Self::TwoBedroomAvgSf,
            (AverageArea, ThreeBed) => Self::ThreeBedroomAvgSf,
            (AverageArea, FourBed) => Self::FourBedroomAvgSf,
            (EffectiveRentPerUnit, Studio) => Self::StudioEffectiveRentUnit,
            (EffectiveRentPerUnit, OneBed) => Self::OneBedroomEffectiveRentUnit,
            (EffectiveRentPerUnit, TwoBed) => Self::TwoBedroomEffectiveRentUnit,
            (EffectiveRentPerUnit, ThreeBed) => Self::ThreeBedroomEffectiveRentUnit,
            (EffectiveRentPerUnit, FourBed) => Self::FourBedroomEffectiveRentUnit,
            (UnitCount, Studio) => Self::StudioUnits,
            (UnitCount, OneBed) => Self::OneBedroomUnits,
            (UnitCount, TwoBed) => Self::TwoBedroomUnits,
            (UnitCount, ThreeBed) => Self::ThreeBedroomUnits,
            (UnitCount, FourBed) => Self::FourBedroomUnits,
            (ConcessionPercentage, Studio) => Self::StudioConcessionsPercentage,
            (ConcessionPercentage, OneBed) => Self::OneBedroomConcessionsPercentage,
            (ConcessionPercentage, TwoBed) => Self::TwoBedroomConcessionsPercentage,
            (ConcessionPercentage, ThreeBed) => Self::ThreeBedroomConcessionsPercentage,
            (ConcessionPercentage, FourBed) => Self::FourBedroomConcessionsPercentage,
        }
    }

    /// Inverse of [`Column::for_bedroom`].
    pub fn bedroom_metric(self) -> Option<(BedroomCategory, UnitMixMetric)> {
        BedroomCategory::ALL.into_iter().find_map(|category| {
            UnitMixMetric::ALL
                .into_iter()
                .find(|metric| Self::for_bedroom(category, *metric) == self)
                .map(|metric| (category, metric))
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
