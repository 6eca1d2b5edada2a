// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Representative source records.

use catsync_core::SourceRecord;
use serde_json::json;

/// A complete product: main image, one extra image, dimensions and two
/// variants (one without a code).
pub fn source_record() -> SourceRecord {
    source_record_with("Lounge Chair", "LC-01")
}

/// [`source_record`] with a different name and model (the destination SKU).
pub fn source_record_with(name: &str, model: &str) -> SourceRecord {
    serde_json::from_value(json!({
        "name": name,
        "model": model,
        "vendor_id": 118,
        "description_sale": "Solid oak frame with linen upholstery.",
        "main_image": format!("https://cdn.catalogiq.app/{model}/main"),
        "images": [{"url": format!("https://cdn.catalogiq.app/{model}/alt-1")}],
        "attributes": [
            {"name": "Weight", "value": "12.5 kg"},
            {"name": "Width", "value": 30},
            {"name": "Length", "value": "32in"},
            {"name": "Height", "value": "40"},
            {"name": "Vendor Name", "value": "Oakworks"},
            {"name": "Finish", "value": "Natural"}
        ],
        "variants": [
            {
                "default_code": format!("{model}-NAT"),
                "attributes": [{"name": "Finish", "value": "Natural"}]
            },
            {
                "default_code": false,
                "attributes": [{"name": "Finish", "value": "Custom"}]
            }
        ]
    }))
    .unwrap_or_else(|e| panic!("fixture does not match SourceRecord: {e}"))
}

/// `count` distinct records named `Product N` with SKU `SKU-N`.
pub fn catalog(count: usize) -> Vec<SourceRecord> {
    (0..count)
        .map(|i| source_record_with(&format!("Product {i}"), &format!("SKU-{i}")))
        .collect()
}
