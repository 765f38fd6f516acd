// tests/common/mod.rs
//! Shared fixtures: portal responses and an in-process transport.

#![allow(dead_code)]

use cre_harvest::{ApiResponse, AppError, CredentialBundle, GraphqlTransport, RequestBatch};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;

/// A complete seven-facet response for `id`.
pub fn full_response(id: u64) -> Value {
    json!([
        {
            "data": {
                "propertyDetail": {
                    "amenities_Info": {
                        "unitAmenities": ["Air Conditioning", "Washer/Dryer"],
                        "amenities": ["Fitness Center", "Pool"],
                        "roomAmenities": []
                    }
                }
            }
        },
        {
            "data": {
                "propertyDetail": {
                    "unit_mix_detail": {
                        "summaryItems": [
                            {
                                "totals": "All 1 Beds",
                                "askingRentPerUnit": "$1,234",
                                "averageArea": "712",
                                "effectiveRentPerUnit": "$1,200",
                                "unitMixBeds": "120",
                                "concessions": "87.5%"
                            },
                            {
                                "totals": "All 2 Beds",
                                "askingRentPerUnit": "$1,650",
                                "averageArea": "1,005",
                                "effectiveRentPerUnit": "$1,610",
                                "unitMixBeds": "80",
                                "concessions": "-"
                            },
                            {
                                "totals": "Totals",
                                "availablePercent": "4.5%",
                                "unitMixBeds": "200"
                            }
                        ]
                    }
                }
            }
        },
        { "data": { "propertyDetail": { "about": { "propertyId": id } } } },
        { "data": { "propertyDetail": { "location": { "submarket": "Uptown" } } } },
        { "data": { "compsContext": { "count": 0 } } },
        {
            "data": {
                "propertyDetail": {
                    "propertyContactDetails_info": {
                        "propertyManager": [{ "name": "Acme Management" }],
                        "trueOwner": [{ "name": "Harbor Capital" }, { "name": "Second Owner" }]
                    }
                }
            }
        },
        {
            "data": {
                "propertyDetail": {
                    "property_info": {
                        "address": {
                            "buildingName": format!("Building {}", id),
                            "deliveryAddress": "100 Main St",
                            "city": "Dallas",
                            "state": "TX",
                            "postalCode": "123456789"
                        },
                        "latitude": 32.78,
                        "longitude": -96.8,
                        "bldgClass": "A",
                        "buildingRating": 4,
                        "yearBuilt": 2004,
                        "renovationYear": 2019,
                        "numOfStories": 5,
                        "numOfParkingSpaces": "None",
                        "constructionStatus": "Existing"
                    }
                }
            }
        }
    ])
}

pub fn full_body(id: u64) -> String {
    full_response(id).to_string()
}

pub fn credentials() -> CredentialBundle {
    CredentialBundle::from_pairs([("session", "abc"), ("token", "xyz")]).unwrap()
}

/// Serves scripted bodies per property id; each call pops the next body,
/// and the last body repeats once the script runs out.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<u64, Vec<String>>>,
    calls: Mutex<HashMap<u64, usize>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, id: u64, bodies: &[&str]) -> Self {
        self.script
            .lock()
            .insert(id, bodies.iter().rev().map(|b| b.to_string()).collect());
        self
    }

    pub fn calls(&self, id: u64) -> usize {
        self.calls.lock().get(&id).copied().unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl GraphqlTransport for ScriptedTransport {
    async fn post_batch(
        &self,
        batch: &RequestBatch,
        _credentials: &CredentialBundle,
    ) -> Result<ApiResponse<String>, AppError> {
        let id = batch.id().value();
        *self.calls.lock().entry(id).or_default() += 1;

        let body = {
            let mut script = self.script.lock();
            let bodies = script.get_mut(&id);
            match bodies {
                Some(bodies) if bodies.len() > 1 => bodies.pop(),
                Some(bodies) => bodies.last().cloned(),
                None => None,
            }
        };

        match body {
            Some(data) => Ok(ApiResponse {
                data,
                status: reqwest::StatusCode::OK,
                url: "https://portal.test/graphql".to_string(),
            }),
            None => Err(AppError::MissingConfiguration(format!(
                "no scripted response for {}",
                id
            ))),
        }
    }
}
