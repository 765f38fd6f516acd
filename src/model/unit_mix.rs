// src/model/unit_mix.rs
//! Bedroom categories and the metrics collected for each of them.

use super::Cell;
use std::fmt;

/// Apartment category by number of bedrooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BedroomCategory {
    Studio,
    OneBed,
    TwoBed,
    ThreeBed,
    FourBed,
}

impl BedroomCategory {
    pub const ALL: [BedroomCategory; 5] = [
        Self::Studio,
        Self::OneBed,
        Self::TwoBed,
        Self::ThreeBed,
        Self::FourBed,
    ];

    /// The `totals` label the portal gives this category's summary row.
    pub fn summary_label(self) -> &'static str {
        match self {
            Self::Studio => "All Studios",
            Self::OneBed => "All 1 Beds",
            Self::TwoBed => "All 2 Beds",
            Self::ThreeBed => "All 3 Beds",
            Self::FourBed => "All 4 Beds",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Studio => "Studio",
            Self::OneBed => "1 Bed",
            Self::TwoBed => "2 Bed",
            Self::ThreeBed => "3 Bed",
            Self::FourBed => "4 Bed",
        }
    }
}

impl fmt::Display for BedroomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the five figures extracted per bedroom category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitMixMetric {
    AskingRentPerUnit,
    AverageArea,
    EffectiveRentPerUnit,
    UnitCount,
    ConcessionPercentage,
}

impl UnitMixMetric {
    pub const ALL: [UnitMixMetric; 5] = [
        Self::AskingRentPerUnit,
        Self::AverageArea,
        Self::EffectiveRentPerUnit,
        Self::UnitCount,
        Self::ConcessionPercentage,
    ];

    /// Key of this metric inside a unit-mix summary item.
    pub fn source_key(self) -> &'static str {
        match self {
            Self::AskingRentPerUnit => "askingRentPerUnit",
            Self::AverageArea => "averageArea",
            Self::EffectiveRentPerUnit => "effectiveRentPerUnit",
            Self::UnitCount => "unitMixBeds",
            Self::ConcessionPercentage => "concessions",
        }
    }
}

/// Metrics for one bedroom category, still in the portal's display format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitMixMetrics {
    pub asking_rent: Cell,
    pub avg_area: Cell,
    pub effective_rent: Cell,
    pub unit_count: Cell,
    pub concession_pct: Cell,
}

impl UnitMixMetrics {
    pub fn get(&self, metric: UnitMixMetric) -> &Cell {
        match metric {
            UnitMixMetric::AskingRentPerUnit => &self.asking_rent,
            UnitMixMetric::AverageArea => &self.avg_area,
            UnitMixMetric::EffectiveRentPerUnit => &self.effective_rent,
            UnitMixMetric::UnitCount => &self.unit_count,
            UnitMixMetric::ConcessionPercentage => &self.concession_pct,
        }
    }
}
