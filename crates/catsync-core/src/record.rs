// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source and destination product records.
//!
//! [`SourceRecord`] mirrors the CatalogIQ product payload. The source is an
//! Odoo export, so optional strings may arrive as `false` and identifiers as
//! integers; the lenient deserializers below absorb both.
//!
//! [`DestinationRecord`] serializes to the BigCommerce v3 product body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One product as returned by the source catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub name: String,

    #[serde(deserialize_with = "lenient::text")]
    pub model: String,

    #[serde(deserialize_with = "lenient::text")]
    pub vendor_id: String,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description_sale: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub main_image: Option<String>,

    #[serde(default)]
    pub images: Vec<SourceImage>,

    #[serde(default)]
    pub attributes: Vec<SourceAttribute>,

    #[serde(default)]
    pub variants: Vec<SourceVariant>,
}

/// An additional (alternative or lifestyle) product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceImage {
    pub url: String,
}

/// A named attribute such as `Weight`, `Width` or `Vendor Name`.
///
/// Values are kept as raw JSON: dimensions may be numbers or strings with
/// units attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAttribute {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceVariant {
    /// Manufacturer SKU; pending and custom items may have none.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub default_code: Option<String>,

    #[serde(default)]
    pub attributes: Vec<SourceAttribute>,
}

/// Response body of one source catalog page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePage {
    #[serde(default)]
    pub results: Vec<SourceRecord>,
}

/// Product classifier on the destination side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Physical,
}

/// Cost, list, sale and retail prices.
///
/// Never populated from source pricing; every record is written with zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTier {
    pub cost_price: f64,
    pub price: f64,
    pub sale_price: f64,
    pub retail_price: f64,
}

/// The product body sent to the destination catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub sku: String,
    pub description: String,
    pub brand_id: u64,
    pub weight: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    #[serde(flatten)]
    pub pricing: PriceTier,
    pub images: Vec<ImageEntry>,
    pub variants: Vec<VariantEntry>,
    pub custom_fields: Vec<CustomField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub image_url: String,
    pub is_thumbnail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub sku: String,
    #[serde(flatten)]
    pub pricing: PriceTier,
    pub option_values: Vec<OptionValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    pub option_display_name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!(
                "expected a string or number, found {other}"
            ))),
        }
    }

    pub(super) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_record_accepts_odoo_false_and_integer_ids() {
        let record: SourceRecord = serde_json::from_value(json!({
            "name": "Lounge Chair",
            "model": "LC-01",
            "vendor_id": 118,
            "description_sale": false,
            "main_image": false,
            "variants": [{"default_code": false, "attributes": []}]
        }))
        .unwrap();

        assert_eq!(record.vendor_id, "118");
        assert_eq!(record.description_sale, None);
        assert_eq!(record.main_image, None);
        assert_eq!(record.variants[0].default_code, None);
        assert!(record.images.is_empty());
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn source_record_requires_model_and_vendor() {
        let err = serde_json::from_value::<SourceRecord>(json!({
            "name": "No vendor",
            "model": "X"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("vendor_id"), "got: {err}");
    }

    #[test]
    fn destination_record_flattens_prices_and_renames_type() {
        let record = DestinationRecord {
            name: "Chair by Acme".into(),
            product_type: ProductType::Physical,
            sku: "LC-01-118".into(),
            description: "<p>x</p>".into(),
            brand_id: 0,
            weight: 1.0,
            width: 2.0,
            depth: 3.0,
            height: 4.0,
            pricing: PriceTier::default(),
            images: vec![],
            variants: vec![VariantEntry {
                sku: "A1".into(),
                pricing: PriceTier::default(),
                option_values: vec![],
            }],
            custom_fields: vec![],
        };

        let body = serde_json::to_value(&record).unwrap();
        assert_eq!(body["type"], "physical");
        assert_eq!(body["price"], 0.0);
        assert_eq!(body["retail_price"], 0.0);
        assert_eq!(body["variants"][0]["cost_price"], 0.0);
        assert!(body.get("pricing").is_none());
    }
}
