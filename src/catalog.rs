//! Catalog records and normalization of raw API payloads.
//!
//! The backend is loosely typed: prices arrive as numbers, numeric strings or
//! null, image lists may be missing entirely, and an endpoint can answer
//! HTTP 200 with an `{ "error": ... }` body. Everything that enters the rest
//! of the application goes through [`normalize_item`] first.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product or accessory record, normalized. Prices are in the base
/// currency (MAD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub old_price: f64,
    pub new_price: f64,
    pub images: Vec<String>,
    /// `None` means "no override", which callers distinguish from an
    /// explicit empty list.
    pub main_images: Option<Vec<String>>,
    pub optional_images: Option<Vec<String>>,
    // Product-only fields, passed through as-is.
    pub ram: Option<String>,
    pub storage: Option<String>,
    pub screen: Option<String>,
    pub graphics: Option<String>,
    pub processor: Option<String>,
    pub os: Option<String>,
    pub promo_code: Option<String>,
    pub promo_type: Option<String>,
    // Accessory-only.
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub slug: Option<String>,
    pub name: String,
}

/// Outcome of validating a raw payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Valid(CatalogItem),
    Invalid(InvalidReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Payload is not a JSON object (null, array, scalar).
    NotAnObject,
    /// Missing or empty `id` field.
    MissingId,
    /// The body carries a top-level `error` field; the backend reports
    /// these with HTTP 200.
    ErrorPayload,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            InvalidReason::NotAnObject => "payload is not an object",
            InvalidReason::MissingId => "payload has no id",
            InvalidReason::ErrorPayload => "payload carries an error field",
        };
        write!(f, "{text}")
    }
}

/// Coerces an identifier that may arrive as a string or a number.
fn coerce_id(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric coercion: number or numeric string → f64, anything else → 0.
/// Never yields NaN.
fn coerce_price(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Array coercion: keeps the string elements of an array, `None` otherwise.
fn coerce_string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }
}

/// Validates and normalizes one raw catalog payload.
pub fn normalize_item(raw: &Value) -> Normalized {
    let Some(fields) = raw.as_object() else {
        return Normalized::Invalid(InvalidReason::NotAnObject);
    };
    if fields.contains_key("error") {
        return Normalized::Invalid(InvalidReason::ErrorPayload);
    }
    let Some(id) = coerce_id(fields.get("id")) else {
        return Normalized::Invalid(InvalidReason::MissingId);
    };

    Normalized::Valid(CatalogItem {
        id,
        name: fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        old_price: coerce_price(fields.get("oldPrice")),
        new_price: coerce_price(fields.get("newPrice")),
        images: coerce_string_list(fields.get("images")).unwrap_or_default(),
        main_images: coerce_string_list(fields.get("mainImages")),
        optional_images: coerce_string_list(fields.get("optionalImages")),
        ram: coerce_string(fields.get("ram")),
        storage: coerce_string(fields.get("storage")),
        screen: coerce_string(fields.get("screen")),
        graphics: coerce_string(fields.get("graphics")),
        processor: coerce_string(fields.get("processor")),
        os: coerce_string(fields.get("os")),
        promo_code: coerce_string(fields.get("promoCode")),
        promo_type: coerce_string(fields.get("promoType")),
        category_id: coerce_string(fields.get("categoryId")),
    })
}

/// Normalizes a collection payload, silently dropping invalid elements.
pub fn normalize_collection(raw: &Value) -> Vec<CatalogItem> {
    match raw.as_array() {
        Some(items) => items
            .iter()
            .filter_map(|v| match normalize_item(v) {
                Normalized::Valid(item) => Some(item),
                Normalized::Invalid(_) => None,
            })
            .collect(),
        None => Vec::new(),
    }
}

pub fn normalize_category(raw: &Value) -> Option<Category> {
    let fields = raw.as_object()?;
    if fields.contains_key("error") {
        return None;
    }
    Some(Category {
        id: coerce_id(fields.get("id"))?,
        slug: coerce_string(fields.get("slug")),
        name: fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

pub fn normalize_categories(raw: &Value) -> Vec<Category> {
    match raw.as_array() {
        Some(items) => items.iter().filter_map(normalize_category).collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expect_valid(raw: &Value) -> CatalogItem {
        match normalize_item(raw) {
            Normalized::Valid(item) => item,
            Normalized::Invalid(reason) => panic!("expected valid item, got {reason}"),
        }
    }

    #[test]
    fn test_full_product_payload() {
        let raw = json!({
            "id": "p-42",
            "name": "Zenbook 14",
            "oldPrice": 12999,
            "newPrice": "10999.50",
            "images": ["a.jpg", "b.jpg"],
            "mainImages": ["m.jpg"],
            "ram": "16GB",
            "storage": "512GB",
            "processor": "Ryzen 7",
            "promoCode": "BACK2SCHOOL",
        });

        let item = expect_valid(&raw);
        assert_eq!(item.id, "p-42");
        assert_eq!(item.name, "Zenbook 14");
        assert_eq!(item.old_price, 12999.0);
        assert_eq!(item.new_price, 10999.5);
        assert_eq!(item.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(item.main_images, Some(vec!["m.jpg".to_string()]));
        assert!(item.optional_images.is_none());
        assert_eq!(item.ram.as_deref(), Some("16GB"));
        assert_eq!(item.promo_code.as_deref(), Some("BACK2SCHOOL"));
        assert!(item.category_id.is_none());
    }

    #[test]
    fn test_missing_prices_default_to_zero() {
        let item = expect_valid(&json!({ "id": "p-1", "name": "Mouse" }));
        assert_eq!(item.old_price, 0.0);
        assert_eq!(item.new_price, 0.0);
    }

    #[test]
    fn test_null_and_garbage_prices_never_produce_nan() {
        let item = expect_valid(&json!({
            "id": "p-1",
            "oldPrice": null,
            "newPrice": "not a number",
        }));
        assert_eq!(item.old_price, 0.0);
        assert_eq!(item.new_price, 0.0);
        assert!(!item.old_price.is_nan());
        assert!(!item.new_price.is_nan());
    }

    #[test]
    fn test_numeric_id_is_coerced_to_string() {
        let item = expect_valid(&json!({ "id": 1337 }));
        assert_eq!(item.id, "1337");
    }

    #[test]
    fn test_images_default_to_empty_but_overrides_stay_absent() {
        let item = expect_valid(&json!({ "id": "p-1", "images": "broken" }));
        assert!(item.images.is_empty());
        assert!(item.main_images.is_none());

        let item = expect_valid(&json!({ "id": "p-1", "mainImages": [] }));
        assert_eq!(item.main_images, Some(Vec::new()));
    }

    #[test]
    fn test_invalid_payloads() {
        assert_eq!(
            normalize_item(&json!(null)),
            Normalized::Invalid(InvalidReason::NotAnObject)
        );
        assert_eq!(
            normalize_item(&json!({ "name": "no id" })),
            Normalized::Invalid(InvalidReason::MissingId)
        );
        assert_eq!(
            normalize_item(&json!({ "id": "" })),
            Normalized::Invalid(InvalidReason::MissingId)
        );
        assert_eq!(
            normalize_item(&json!({ "id": "p-1", "error": "gone" })),
            Normalized::Invalid(InvalidReason::ErrorPayload)
        );
    }

    #[test]
    fn test_collection_drops_invalid_elements() {
        let raw = json!([
            { "id": "p-1", "name": "Keep" },
            { "name": "no id, dropped" },
            { "id": "p-2", "error": "dropped too" },
            { "id": "p-3" },
        ]);
        let items = normalize_collection(&raw);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "p-1");
        assert_eq!(items[1].id, "p-3");
    }

    #[test]
    fn test_collection_of_non_array_is_empty() {
        assert!(normalize_collection(&json!({ "error": "boom" })).is_empty());
    }

    #[test]
    fn test_category_normalization() {
        let categories = normalize_categories(&json!([
            { "id": "c-1", "slug": "laptops", "name": "Laptops" },
            { "id": "c-2", "name": "Audio" },
            { "name": "dropped" },
        ]));
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].slug.as_deref(), Some("laptops"));
        assert!(categories[1].slug.is_none());
    }
}
