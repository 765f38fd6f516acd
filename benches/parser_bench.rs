// benches/parser_bench.rs
//! Benchmarks for response parsing and normalization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cre_harvest::{normalize_record, parse, PropertyId};
use serde_json::{json, Value};

fn create_sample_response(amenity_count: usize) -> String {
    let amenities: Vec<Value> = (0..amenity_count)
        .map(|i| json!(format!("Air Conditioning {}", i)))
        .collect();
    json!([
        { "data": { "propertyDetail": { "amenities_Info": {
            "unitAmenities": amenities,
            "amenities": ["Fitness Center", "Wheelchair Accessible (Rooms)"],
            "roomAmenities": []
        } } } },
        { "data": { "propertyDetail": { "unit_mix_detail": { "summaryItems": [
            { "totals": "All Studios", "askingRentPerUnit": "$995", "averageArea": "480",
              "effectiveRentPerUnit": "$980", "unitMixBeds": "40", "concessions": "1.5%" },
            { "totals": "All 1 Beds", "askingRentPerUnit": "$1,234", "averageArea": "712",
              "effectiveRentPerUnit": "$1,200", "unitMixBeds": "120", "concessions": "-" },
            { "totals": "Totals", "availablePercent": "4.5%", "unitMixBeds": "160" }
        ] } } } },
        { "data": null },
        { "data": null },
        { "data": null },
        { "data": { "propertyDetail": { "propertyContactDetails_info": {
            "propertyManager": [{ "name": "Acme Management" }],
            "trueOwner": [{ "name": "Harbor Capital" }]
        } } } },
        { "data": { "propertyDetail": { "property_info": {
            "address": { "buildingName": "The Lofts", "deliveryAddress": "100 Main St",
                         "city": "Dallas", "state": "TX", "postalCode": "752011234" },
            "yearBuilt": 2004,
            "numOfParkingSpaces": "None"
        } } } }
    ])
    .to_string()
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for amenity_count in [0, 20, 200].iter() {
        let raw = create_sample_response(*amenity_count);
        group.bench_with_input(
            BenchmarkId::from_parameter(amenity_count),
            &raw,
            |b, raw| b.iter(|| parse(black_box(PropertyId::new(1)), black_box(raw))),
        );
    }

    group.finish();
}

fn benchmark_parse_and_normalize(c: &mut Criterion) {
    let raw = create_sample_response(200);
    c.bench_function("parse_and_normalize", |b| {
        b.iter(|| {
            parse(PropertyId::new(1), black_box(&raw))
                .map(normalize_record)
                .ok()
        })
    });
}

criterion_group!(benches, benchmark_parse, benchmark_parse_and_normalize);
criterion_main!(benches);
