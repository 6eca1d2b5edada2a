// SPDX-FileCopyrightText: 2026 Catsync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CatalogIQ product to BigCommerce product mapping.

use catsync_core::record::{
    CustomField, DestinationRecord, ImageEntry, OptionValue, PriceTier, ProductType,
    SourceAttribute, SourceRecord, SourceVariant, VariantEntry,
};
use serde_json::Value;

use crate::number::clean_number;

/// Used when the source record has no sale description.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// Appended to the main image reference to request the full-size rendition.
pub const MAIN_IMAGE_SUFFIX: &str = "/1000x1000";

/// BigCommerce rejects custom field values of this many characters or more.
pub const CUSTOM_FIELD_MAX_CHARS: usize = 255;

const VENDOR_NAME: &str = "Vendor Name";
const WEIGHT: &str = "Weight";
const WIDTH: &str = "Width";
const LENGTH: &str = "Length";
const HEIGHT: &str = "Height";

/// Maps one source product to the destination product body.
///
/// Pure and deterministic: the same input always yields the same record.
pub fn transform(source: &SourceRecord) -> DestinationRecord {
    let attributes = AttributeMap::collapse(&source.attributes);

    let vendor_name = attributes
        .get(VENDOR_NAME)
        .and_then(attribute_text)
        .unwrap_or_default();

    DestinationRecord {
        name: format!("{} by {vendor_name}", source.name),
        product_type: ProductType::Physical,
        sku: format!("{}-{}", source.model, source.vendor_id),
        description: describe(source.description_sale.as_deref()),
        brand_id: 0,
        weight: attributes.number(WEIGHT),
        width: attributes.number(WIDTH),
        depth: attributes.number(LENGTH),
        height: attributes.number(HEIGHT),
        pricing: PriceTier::default(),
        images: images(source),
        variants: source
            .variants
            .iter()
            .filter(|v| keep_variant(v))
            .map(variant)
            .collect(),
        custom_fields: attributes.custom_fields(),
    }
}

/// Variant policy: only variants with a non-empty manufacturer code are sent.
///
/// Pending items and custom products often lack one, and the destination
/// requires a SKU per variant.
pub fn keep_variant(variant: &SourceVariant) -> bool {
    variant
        .default_code
        .as_deref()
        .is_some_and(|code| !code.is_empty())
}

/// Custom field policy: the value must be non-empty and under the
/// destination's length limit.
pub fn accepts_custom_field(value: &str) -> bool {
    !value.is_empty() && value.chars().count() < CUSTOM_FIELD_MAX_CHARS
}

/// Text form of an attribute value, if it has one.
///
/// Strings pass through, numbers and booleans use their JSON text, and
/// null/array/object values have none.
pub fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn describe(description: Option<&str>) -> String {
    let text = match description {
        Some(d) if !d.is_empty() => d,
        _ => DESCRIPTION_PLACEHOLDER,
    };
    format!("<p>{text}</p>")
}

fn images(source: &SourceRecord) -> Vec<ImageEntry> {
    let main = source
        .main_image
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| ImageEntry {
            image_url: format!("{url}{MAIN_IMAGE_SUFFIX}"),
            is_thumbnail: true,
        });

    main.into_iter()
        .chain(source.images.iter().map(|image| ImageEntry {
            image_url: image.url.clone(),
            is_thumbnail: false,
        }))
        .collect()
}

fn variant(source: &SourceVariant) -> VariantEntry {
    VariantEntry {
        sku: source.default_code.clone().unwrap_or_default(),
        pricing: PriceTier::default(),
        option_values: source
            .attributes
            .iter()
            .map(|attr| OptionValue {
                option_display_name: attr.name.clone(),
                label: attribute_text(&attr.value).unwrap_or_default(),
            })
            .collect(),
    }
}

/// Attributes keyed by exact name, in first-seen order.
///
/// A repeated name keeps its original position and takes the later value.
struct AttributeMap<'a> {
    entries: Vec<(&'a str, &'a Value)>,
}

impl<'a> AttributeMap<'a> {
    fn collapse(attributes: &'a [SourceAttribute]) -> Self {
        let mut entries: Vec<(&'a str, &'a Value)> = Vec::with_capacity(attributes.len());
        for attr in attributes {
            match entries.iter_mut().find(|(name, _)| *name == attr.name) {
                Some(slot) => slot.1 = &attr.value,
                None => entries.push((attr.name.as_str(), &attr.value)),
            }
        }
        Self { entries }
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    fn number(&self, name: &str) -> f64 {
        self.get(name).map(clean_number).unwrap_or(0.0)
    }

    fn custom_fields(&self) -> Vec<CustomField> {
        self.entries
            .iter()
            .filter_map(|(name, value)| {
                let text = attribute_text(value)?;
                accepts_custom_field(&text).then(|| CustomField {
                    name: (*name).to_string(),
                    value: text,
                })
            })
            .collect()
    }
}
