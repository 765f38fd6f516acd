// src/parser/facets.rs
//! Structural validation of a raw response.
//!
//! A body either yields the four sections the field extractors read, or a
//! [`StructuralDefect`] saying why it cannot.

use super::accessor::lookup;
use crate::api::Facet;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::StructuralDefect;
use serde_json::Value;

const AMENITIES_INFO: &str = "/data/propertyDetail/amenities_Info";
const SUMMARY_ITEMS: &str = "/data/propertyDetail/unit_mix_detail/summaryItems";
const CONTACT_DETAILS: &str = "/data/propertyDetail/propertyContactDetails_info";
const PROPERTY_INFO: &str = "/data/propertyDetail/property_info";

/// Facets whose sections every record needs. Errors on any other facet
/// only null the columns it feeds.
const REQUIRED_FACETS: [Facet; 3] = [Facet::Amenities, Facet::UnitMix, Facet::PropertyDetails];

/// Borrowed views into the facet documents that carry business fields.
#[derive(Debug, Clone, Copy)]
pub struct FacetSections<'a> {
    pub amenities: &'a Value,
    pub summary_items: &'a [Value],
    /// Contacts are optional: a missing section only nulls two columns.
    pub contacts: Option<&'a Value>,
    pub property_info: &'a Value,
}

/// Decodes a body into its JSON document.
pub fn decode(raw: &str) -> Result<Value, StructuralDefect> {
    if raw.trim().is_empty() {
        return Err(StructuralDefect::EmptyBody);
    }
    serde_json::from_str(raw).map_err(|e| {
        let preview: String = raw.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        StructuralDefect::NotJson {
            message: format!("{} (body starts {:?})", e, preview),
        }
    })
}

/// Checks the document shape and borrows the required sections.
pub fn split(root: &Value) -> Result<FacetSections<'_>, StructuralDefect> {
    let documents = root.as_array().ok_or(StructuralDefect::NotABatch)?;

    for facet in Facet::ALL {
        let document = documents
            .get(facet.slot())
            .ok_or(StructuralDefect::MissingFacet(facet))?;
        if REQUIRED_FACETS.contains(&facet) {
            check_graphql_errors(facet, document)?;
        }
    }

    let section = |facet: Facet, pointer: &str| {
        documents
            .get(facet.slot())
            .and_then(|d| lookup(d, pointer))
    };

    let amenities = section(Facet::Amenities, AMENITIES_INFO)
        .filter(|v| v.is_object())
        .ok_or(StructuralDefect::MissingSection {
            facet: Facet::Amenities,
            path: "amenities_Info",
        })?;

    let summary_items = section(Facet::UnitMix, SUMMARY_ITEMS)
        .and_then(Value::as_array)
        .ok_or(StructuralDefect::MissingSection {
            facet: Facet::UnitMix,
            path: "unit_mix_detail.summaryItems",
        })?;

    let property_info = section(Facet::PropertyDetails, PROPERTY_INFO)
        .filter(|v| v.is_object())
        .ok_or(StructuralDefect::MissingSection {
            facet: Facet::PropertyDetails,
            path: "property_info",
        })?;

    let contacts = section(Facet::Contacts, CONTACT_DETAILS).filter(|v| v.is_object());

    Ok(FacetSections {
        amenities,
        summary_items,
        contacts,
        property_info,
    })
}

/// A facet answered with `errors` and no `data` is unusable.
fn check_graphql_errors(facet: Facet, document: &Value) -> Result<(), StructuralDefect> {
    let errors = match lookup(document, "/errors").and_then(Value::as_array) {
        Some(errors) if !errors.is_empty() => errors,
        _ => return Ok(()),
    };
    if lookup(document, "/data").is_some() {
        return Ok(());
    }
    let message = errors
        .iter()
        .filter_map(|e| lookup(e, "/message").and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join("; ");
    Err(StructuralDefect::GraphqlErrors { facet, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_batch() -> Value {
        json!([
            { "data": { "propertyDetail": { "amenities_Info": {} } } },
            { "data": { "propertyDetail": { "unit_mix_detail": { "summaryItems": [] } } } },
            { "data": {} },
            { "data": {} },
            { "data": {} },
            { "data": {} },
            { "data": { "propertyDetail": { "property_info": {} } } }
        ])
    }

    #[test]
    fn test_minimal_batch_splits() {
        let root = minimal_batch();
        let sections = split(&root).unwrap();
        assert!(sections.summary_items.is_empty());
        assert!(sections.contacts.is_none());
    }

    #[test]
    fn test_decode_failures() {
        assert_eq!(decode("  \n"), Err(StructuralDefect::EmptyBody));
        assert!(matches!(
            decode("<html>Service Unavailable</html>"),
            Err(StructuralDefect::NotJson { .. })
        ));
    }

    #[test]
    fn test_short_batch_names_missing_slot() {
        let mut root = minimal_batch();
        root.as_array_mut().unwrap().truncate(6);
        assert_eq!(
            split(&root).unwrap_err(),
            StructuralDefect::MissingFacet(Facet::PropertyDetails)
        );
        assert_eq!(split(&json!({})).unwrap_err(), StructuralDefect::NotABatch);
    }

    #[test]
    fn test_property_info_must_be_object() {
        let mut root = minimal_batch();
        root[6]["data"]["propertyDetail"]["property_info"] = json!(null);
        assert_eq!(
            split(&root).unwrap_err(),
            StructuralDefect::MissingSection {
                facet: Facet::PropertyDetails,
                path: "property_info"
            }
        );
    }

    #[test]
    fn test_graphql_errors_without_data() {
        let mut root = minimal_batch();
        root[1] = json!({ "errors": [ { "message": "Not authorized" } ], "data": null });
        assert_eq!(
            split(&root).unwrap_err(),
            StructuralDefect::GraphqlErrors {
                facet: Facet::UnitMix,
                message: "Not authorized".to_string()
            }
        );
    }

    #[test]
    fn test_errors_on_unread_facets_are_field_gaps() {
        let mut root = minimal_batch();
        for slot in [2, 3, 4, 5] {
            root[slot] = json!({ "errors": [ { "message": "unavailable" } ], "data": null });
        }
        let sections = split(&root).unwrap();
        assert!(sections.contacts.is_none());
    }

    #[test]
    fn test_graphql_errors_with_data_are_tolerated() {
        let mut root = minimal_batch();
        root[3]["errors"] = json!([ { "message": "partial" } ]);
        assert!(split(&root).is_ok());
    }
}
