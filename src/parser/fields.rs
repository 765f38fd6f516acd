// src/parser/fields.rs
//! One extraction function per non-unit-mix column group.

use super::accessor::{cell_at, strings_at};
use crate::constants::AMENITY_DELIMITER;
use crate::model::Cell;
use serde_json::Value;

/// Length of a ZIP+4 code written without its hyphen.
const ZIP_PLUS_FOUR_LEN: usize = 9;
const ZIP_LEN: usize = 5;

pub fn building_name(info: &Value) -> Cell {
    cell_at(info, "/address/buildingName")
}

pub fn delivery_address(info: &Value) -> Cell {
    cell_at(info, "/address/deliveryAddress")
}

pub fn city(info: &Value) -> Cell {
    cell_at(info, "/address/city")
}

pub fn state(info: &Value) -> Cell {
    cell_at(info, "/address/state")
}

/// Nine-character postal codes are cut to the five-digit ZIP.
pub fn zip(info: &Value) -> Cell {
    match cell_at(info, "/address/postalCode") {
        Cell::Text(code) if code.chars().count() == ZIP_PLUS_FOUR_LEN => {
            Cell::Text(code.chars().take(ZIP_LEN).collect())
        }
        other => other,
    }
}

/// The portal spells "no parking" as the string `"None"`.
pub fn parking_spaces(info: &Value) -> Cell {
    match cell_at(info, "/numOfParkingSpaces") {
        Cell::Text(s) if s == "None" => Cell::Integer(0),
        other => other,
    }
}

/// Name of the first listed company in a contacts role, e.g. `propertyManager`.
pub fn first_company_name(contacts: Option<&Value>, role: &str) -> Cell {
    let Some(contacts) = contacts else {
        return Cell::Null;
    };
    match cell_at(contacts, &format!("/{}/0/name", role)) {
        Cell::Text(name) if name.trim().is_empty() => Cell::Null,
        other => other,
    }
}

/// Unit, property and room amenities joined into one list.
pub fn amenities(amenities_info: &Value) -> Cell {
    let joined = ["/unitAmenities", "/amenities", "/roomAmenities"]
        .iter()
        .flat_map(|pointer| strings_at(amenities_info, pointer))
        .collect::<Vec<_>>()
        .join(AMENITY_DELIMITER);
    if joined.is_empty() {
        Cell::Null
    } else {
        Cell::Text(joined)
    }
}
