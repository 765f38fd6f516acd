// src/model/mod.rs
//! Domain model: the property table the pipeline produces.
//!
//! - [`Column`] is the fixed 45-column business schema and its sink types.
//! - [`ParsedRecord`] is one schema-complete row of [`Cell`]s.
//! - [`PropertyTable`] collects the rows of one run.
//! - [`BedroomCategory`] and [`UnitMixMetrics`] describe the unit-mix section.

mod columns;
mod record;
mod table;
mod unit_mix;

pub use columns::{Coercion, Column, SinkType, COLLECTED_DATE_STAMP, MOST_RECENT_FLAG};
pub use record::{Cell, ParsedRecord};
pub use table::{FailedProperty, PropertyTable};
pub use unit_mix::{BedroomCategory, UnitMixMetric, UnitMixMetrics};
