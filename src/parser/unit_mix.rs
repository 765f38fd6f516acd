// src/parser/unit_mix.rs
//! Reads the unit-mix summary rows.
//!
//! The portal returns one summary item per bedroom category plus a `Totals`
//! row, each labelled by its `totals` field. Categories the property does
//! not have are simply absent.

use super::accessor::{cell_at, lookup};
use crate::model::{BedroomCategory, Cell, UnitMixMetric, UnitMixMetrics};
use indexmap::IndexMap;
use serde_json::Value;

const TOTALS_LABEL: &str = "Totals";

/// The portal's "no value" placeholder.
const DASH: &str = "-";

/// Summary items indexed by their `totals` label.
#[derive(Debug, Clone)]
pub struct UnitMixSummary<'a> {
    rows: IndexMap<&'a str, &'a Value>,
}

impl<'a> UnitMixSummary<'a> {
    /// Indexes the items; unlabelled items are ignored and the first item
    /// wins when a label repeats.
    pub fn new(items: &'a [Value]) -> Self {
        let mut rows = IndexMap::new();
        for item in items {
            if let Some(label) = lookup(item, "/totals").and_then(Value::as_str) {
                rows.entry(label.trim()).or_insert(item);
            }
        }
        Self { rows }
    }

    fn row(&self, label: &str) -> Option<&'a Value> {
        self.rows.get(label).copied()
    }

    /// The five metrics for one category, all null when the row is absent.
    pub fn metrics(&self, category: BedroomCategory) -> UnitMixMetrics {
        let Some(row) = self.row(category.summary_label()) else {
            return UnitMixMetrics::default();
        };
        let read = |metric: UnitMixMetric| screen_dash(cell_at(row, &pointer(metric.source_key())));
        UnitMixMetrics {
            asking_rent: read(UnitMixMetric::AskingRentPerUnit),
            avg_area: read(UnitMixMetric::AverageArea),
            effective_rent: read(UnitMixMetric::EffectiveRentPerUnit),
            unit_count: read(UnitMixMetric::UnitCount),
            concession_pct: read(UnitMixMetric::ConcessionPercentage),
        }
    }

    /// Metrics for every category, in category order.
    pub fn by_category(&self) -> IndexMap<BedroomCategory, UnitMixMetrics> {
        BedroomCategory::ALL
            .into_iter()
            .map(|category| (category, self.metrics(category)))
            .collect()
    }

    /// `100 − availablePercent` of the `Totals` row.
    pub fn percent_leased(&self) -> Cell {
        let Some(available) = self
            .row(TOTALS_LABEL)
            .and_then(|row| lookup(row, "/availablePercent"))
        else {
            return Cell::Null;
        };
        let available = match available {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => strip_last_char(s).trim().parse::<f64>().ok(),
            _ => None,
        };
        available.map(|pct| Cell::Float(100.0 - pct)).unwrap_or_default()
    }

    /// Total unit count of the `Totals` row, in display format.
    pub fn number_of_units(&self) -> Cell {
        self.row(TOTALS_LABEL)
            .map(|row| cell_at(row, "/unitMixBeds"))
            .unwrap_or_default()
    }
}

fn pointer(key: &str) -> String {
    format!("/{}", key)
}

fn screen_dash(cell: Cell) -> Cell {
    match cell {
        Cell::Text(ref s) if s == DASH => Cell::Null,
        other => other,
    }
}

fn strip_last_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next_back();
    chars.as_str()
}
