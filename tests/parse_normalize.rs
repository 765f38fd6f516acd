// tests/parse_normalize.rs
//! Raw response → parsed record → normalized record.

mod common;

use cre_harvest::{normalize_record, parse, Cell, Column, PropertyId, StructuralDefect};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn parsing_the_same_body_twice_yields_the_same_record() {
    let body = common::full_body(4242);
    let first = parse(PropertyId::new(4242), &body).unwrap();
    let second = parse(PropertyId::new(4242), &body).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), Column::COUNT);
}

#[test]
fn parsed_record_keeps_display_format() {
    let record = parse(PropertyId::new(7), &common::full_body(7)).unwrap();

    assert_eq!(record.get(Column::PropertyId), &Cell::Integer(7));
    assert_eq!(record.get(Column::PropertyName), &Cell::text("Building 7"));
    assert_eq!(record.get(Column::OneBedroomAskingRentUnit), &Cell::text("$1,234"));
    assert_eq!(record.get(Column::TwoBedroomConcessionsPercentage), &Cell::Null);
    assert_eq!(record.get(Column::Zip), &Cell::text("12345"));
    assert_eq!(record.get(Column::ParkingSpaces), &Cell::Integer(0));
    assert_eq!(record.get(Column::PropertyManagerName), &Cell::text("Acme Management"));
    assert_eq!(record.get(Column::TrueOwnerName), &Cell::text("Harbor Capital"));
    assert_eq!(record.get(Column::PercentLeased), &Cell::Float(95.5));
    assert_eq!(record.get(Column::YearRenovated), &Cell::Integer(2019));
}

#[test]
fn normalized_record_has_sink_types() {
    let record = parse(PropertyId::new(7), &common::full_body(7)).unwrap();
    let record = normalize_record(record);

    assert_eq!(record.get(Column::OneBedroomAskingRentUnit), &Cell::Integer(1234));
    assert_eq!(record.get(Column::OneBedroomEffectiveRentUnit), &Cell::Integer(1200));
    assert_eq!(record.get(Column::OneBedroomConcessionsPercentage), &Cell::Float(87.5));
    assert_eq!(record.get(Column::TwoBedroomAvgSf), &Cell::Integer(1005));
    assert_eq!(record.get(Column::NumberOfUnits), &Cell::Integer(200));
    assert_eq!(record.get(Column::TwoBedroomConcessionsPercentage), &Cell::Null);
    assert_eq!(
        record.get(Column::Amenities),
        &Cell::text("A/C; W/D; Fitness Center; Pool")
    );
}

#[test]
fn missing_bedroom_category_is_all_null() {
    let record = normalize_record(parse(PropertyId::new(7), &common::full_body(7)).unwrap());
    for column in [
        Column::ThreeBedroomAskingRentUnit,
        Column::ThreeBedroomAvgSf,
        Column::ThreeBedroomEffectiveRentUnit,
        Column::ThreeBedroomUnits,
        Column::ThreeBedroomConcessionsPercentage,
        Column::StudioUnits,
    ] {
        assert!(record.get(column).is_null(), "{} should be null", column);
    }
}

#[test]
fn over_long_amenities_are_cut_at_a_delimiter() {
    let mut response = common::full_response(9);
    let long_name = "a".repeat(248);
    response[0]["data"]["propertyDetail"]["amenities_Info"] = json!({
        "unitAmenities": [long_name, "b"],
        "amenities": [],
        "roomAmenities": []
    });

    let record = normalize_record(parse(PropertyId::new(9), &response.to_string()).unwrap());
    let amenities = record.get(Column::Amenities).as_text().unwrap();
    assert_eq!(amenities.chars().count(), 248);
    assert!(!amenities.ends_with(';'));
}

#[test]
fn unparseable_text_is_stored_as_null() {
    let mut response = common::full_response(11);
    response[1]["data"]["propertyDetail"]["unit_mix_detail"]["summaryItems"][0]
        ["askingRentPerUnit"] = json!("Call for pricing");

    let record = normalize_record(parse(PropertyId::new(11), &response.to_string()).unwrap());
    assert!(record.get(Column::OneBedroomAskingRentUnit).is_null());
    assert_eq!(record.get(Column::OneBedroomAvgSf), &Cell::Integer(712));
}

#[test]
fn missing_required_section_is_structural() {
    let mut response = common::full_response(12);
    response[6] = json!({ "data": { "propertyDetail": {} } });

    let err = parse(PropertyId::new(12), &response.to_string()).unwrap_err();
    assert!(err.is_row_local());
    assert!(matches!(
        err.structural_defect(),
        Some(StructuralDefect::MissingSection { .. })
    ));
}

#[test]
fn missing_contacts_leave_names_null() {
    let mut response = common::full_response(13);
    response[5] = json!({ "data": null });

    let record = parse(PropertyId::new(13), &response.to_string()).unwrap();
    assert!(record.get(Column::PropertyManagerName).is_null());
    assert!(record.get(Column::TrueOwnerName).is_null());
    assert_eq!(record.get(Column::City), &Cell::text("Dallas"));
}

#[test]
fn errors_on_unread_facets_do_not_fail_the_record() {
    let mut response = common::full_response(21);
    response[4] = json!({ "errors": [{ "message": "comps unavailable" }], "data": null });
    response[5] = json!({ "errors": [{ "message": "contacts unavailable" }], "data": null });

    let record = parse(PropertyId::new(21), &response.to_string()).unwrap();
    assert_eq!(record.get(Column::City), &Cell::text("Dallas"));
    assert!(record.get(Column::PropertyManagerName).is_null());
}

#[test]
fn errors_on_a_required_facet_are_structural() {
    let mut response = common::full_response(22);
    response[1] = json!({ "errors": [{ "message": "unit mix unavailable" }], "data": null });

    let err = parse(PropertyId::new(22), &response.to_string()).unwrap_err();
    assert!(matches!(
        err.structural_defect(),
        Some(StructuralDefect::GraphqlErrors { .. })
    ));
}
