// src/parser/mod.rs
//! Response parsing: one raw body in, one schema-complete record out.
//!
//! Parsing is a pure function of the stored bytes. Field-level gaps become
//! null cells; only a body that cannot be read as a seven-facet document is
//! an error, and that error is what triggers a reissue.

mod accessor;
mod facets;
mod fields;
mod unit_mix;

pub use accessor::lookup;
pub use facets::FacetSections;
pub use unit_mix::UnitMixSummary;

use crate::error::AppError;
use crate::model::{Column, ParsedRecord, UnitMixMetric};
use crate::types::PropertyId;
use accessor::cell_at;

/// Parses one raw response into a record for `id`.
///
/// # Errors
///
/// [`AppError::StructuralParse`] when the body is empty, not JSON, not a
/// seven-facet array, or lacks one of the required sections.
pub fn parse(id: PropertyId, raw: &str) -> Result<ParsedRecord, AppError> {
    let root = facets::decode(raw).map_err(|defect| AppError::StructuralParse { id, defect })?;
    let sections = facets::split(&root).map_err(|defect| AppError::StructuralParse { id, defect })?;
    Ok(extract(id, &sections))
}

/// Fills every column from already validated sections.
pub fn extract(id: PropertyId, sections: &FacetSections<'_>) -> ParsedRecord {
    let mut record = ParsedRecord::new(id);
    let info = sections.property_info;

    let summary = UnitMixSummary::new(sections.summary_items);
    for (category, metrics) in summary.by_category() {
        for metric in UnitMixMetric::ALL {
            record.set(Column::for_bedroom(category, metric), metrics.get(metric).clone());
        }
    }
    record.set(Column::NumberOfUnits, summary.number_of_units());
    record.set(Column::PercentLeased, summary.percent_leased());

    record.set(Column::PropertyName, fields::building_name(info));
    record.set(Column::PropertyAddress, fields::delivery_address(info));
    record.set(Column::City, fields::city(info));
    record.set(Column::State, fields::state(info));
    record.set(Column::Zip, fields::zip(info));
    record.set(Column::ParkingSpaces, fields::parking_spaces(info));

    record.set(Column::Latitude, cell_at(info, "/latitude"));
    record.set(Column::Longitude, cell_at(info, "/longitude"));
    record.set(Column::BuildingClass, cell_at(info, "/bldgClass"));
    record.set(Column::StarRating, cell_at(info, "/buildingRating"));
    record.set(Column::YearBuilt, cell_at(info, "/yearBuilt"));
    record.set(Column::YearRenovated, cell_at(info, "/renovationYear"));
    record.set(Column::BuildingStories, cell_at(info, "/numOfStories"));
    record.set(Column::ConstructionStatus, cell_at(info, "/constructionStatus"));

    record.set(
        Column::PropertyManagerName,
        fields::first_company_name(sections.contacts, "propertyManager"),
    );
    record.set(
        Column::TrueOwnerName,
        fields::first_company_name(sections.contacts, "trueOwner"),
    );
    record.set(Column::Amenities, fields::amenities(sections.amenities));

    record
}
