// src/normalize/amenities.rs
//! Shortens the amenities list to fit its column.

use crate::constants::AMENITIES_MAX_CHARS;

/// Long amenity names and their stored abbreviations, applied in order.
///
/// Order matters: `Wheelchair Accessible (Rooms)` must be rewritten before
/// the generic `Accessible` rule sees it.
pub const ABBREVIATIONS: [(&str, &str); 18] = [
    ("24 Hour Access", "24Hr Access"),
    ("Air Conditioning", "A/C"),
    ("Bicycle Storage", "Bike Storage"),
    ("Refridgerator", "Fridge"),
    ("Basketball Court", "Bball Court"),
    ("Storage Space", "Storage"),
    ("Walking/Biking Trails", "Walk/Bike Trails"),
    ("Property Manager on Site", "Onsite PM"),
    ("Wheelchair Accessible (Rooms)", "Wheelchair Access Rooms"),
    ("Accessible", "Access"),
    ("Planned Social Activities", "Social Events"),
    ("Maintenance on site", "Onsite Maintenance"),
    ("Furnished Units Available", "Furnished Option"),
    ("Hardwood Floors", "Hardwood"),
    ("Pet Washing Station", "Pet Wash Station"),
    ("Laundry Facilities", "Laundry Facs"),
    ("Tenant Controlled HVAC", "Controllable HVAC"),
    ("Washer/Dryer", "W/D"),
];

pub fn abbreviate(list: &str) -> String {
    ABBREVIATIONS
        .iter()
        .fold(list.to_string(), |acc, (long, short)| acc.replace(long, short))
}

/// Cuts an over-long list at the last `;` within the limit so no entry is
/// left half-written. Without a delimiter in range the list is cut hard.
pub fn truncate(list: &str) -> String {
    if list.chars().count() <= AMENITIES_MAX_CHARS {
        return list.to_string();
    }
    let head: String = list.chars().take(AMENITIES_MAX_CHARS).collect();
    match head.rfind(';') {
        Some(index) => head[..index].to_string(),
        None => head,
    }
}

/// Abbreviation followed by truncation.
pub fn shrink(list: &str) -> String {
    truncate(&abbreviate(list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviate_in_order() {
        assert_eq!(
            abbreviate("Wheelchair Accessible (Rooms); Washer/Dryer; Air Conditioning"),
            "Wheelchair Access Rooms; W/D; A/C"
        );
        assert_eq!(abbreviate("Accessible Entry"), "Access Entry");
        assert_eq!(abbreviate("Pool"), "Pool");
    }

    #[test]
    fn test_truncate_at_last_delimiter() {
        let mut list = "a".repeat(248);
        list.push_str("; b");
        assert_eq!(list.chars().count(), 251);
        assert_eq!(truncate(&list), "a".repeat(248));
    }

    #[test]
    fn test_truncate_leaves_short_lists() {
        let list = "x".repeat(250);
        assert_eq!(truncate(&list), list);
    }

    #[test]
    fn test_truncate_without_delimiter_cuts_hard() {
        let list = "é".repeat(300);
        let cut = truncate(&list);
        assert_eq!(cut.chars().count(), 250);
    }
}
