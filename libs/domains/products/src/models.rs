use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use mongodb::bson::{Bson, Document, oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::error::MalformedProduct;

/// Catalog entry as stored in the `products` collection.
///
/// Only the fields the API filters or sorts on are typed. Everything else the
/// storefront keeps on a product (name, images, description...) is carried in
/// `extra` and returned untouched.
///
/// The catalog is written by other tools, so decoding is lenient: numeric
/// strings count as numbers, a date-only `createdAt` is midnight UTC, and a
/// typed field that still does not parse stays `None` with its raw value kept
/// in `extra`. Only a missing or non-ObjectId `_id` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "Document")]
pub struct Product {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "toys")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 24.99)]
    pub price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 4.5)]
    pub rating: Option<f64>,

    #[serde(rename = "isFlash", skip_serializing_if = "Option::is_none")]
    pub is_flash: Option<bool>,

    #[serde(
        rename = "createdAt",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_created_at"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Untyped fields, plus typed ones whose stored value did not parse
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

impl TryFrom<Document> for Product {
    type Error = MalformedProduct;

    fn try_from(mut document: Document) -> Result<Self, Self::Error> {
        let id = match document.remove("_id") {
            Some(Bson::ObjectId(id)) => id,
            Some(Bson::String(hex)) => ObjectId::parse_str(&hex)
                .map_err(|_| MalformedProduct(format!("_id '{}' is not an ObjectId", hex)))?,
            Some(other) => {
                return Err(MalformedProduct(format!(
                    "_id has type {:?}",
                    other.element_type()
                )));
            }
            None => return Err(MalformedProduct("missing _id".to_string())),
        };

        let mut product = Self {
            id,
            category: None,
            price: None,
            rating: None,
            is_flash: None,
            created_at: None,
            extra: Map::new(),
        };

        for (key, value) in document {
            let unparsed = match key.as_str() {
                "category" => fill(&mut product.category, as_text(value)),
                "price" => fill(&mut product.price, as_number(value)),
                "rating" => fill(&mut product.rating, as_number(value)),
                "isFlash" => fill(&mut product.is_flash, as_flag(value)),
                "createdAt" => fill(&mut product.created_at, as_date(value)),
                _ => Some(value),
            };
            if let Some(raw) = unparsed {
                product.extra.insert(key, bson_to_json(raw));
            }
        }

        Ok(product)
    }
}

/// Store a parsed value, or hand back the raw one. Null means absent.
fn fill<T>(slot: &mut Option<T>, parsed: Result<T, Bson>) -> Option<Bson> {
    match parsed {
        Ok(value) => {
            *slot = Some(value);
            None
        }
        Err(Bson::Null) => None,
        Err(raw) => Some(raw),
    }
}

fn as_text(value: Bson) -> Result<String, Bson> {
    match value {
        Bson::String(text) => Ok(text),
        other => Err(other),
    }
}

fn as_flag(value: Bson) -> Result<bool, Bson> {
    match value {
        Bson::Boolean(flag) => Ok(flag),
        other => Err(other),
    }
}

fn as_number(value: Bson) -> Result<f64, Bson> {
    let number = match &value {
        Bson::Double(n) => Some(*n),
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).ok_or(value)
}

fn as_date(value: Bson) -> Result<DateTime<Utc>, Bson> {
    let parsed = match &value {
        Bson::DateTime(at) => DateTime::from_timestamp_millis(at.timestamp_millis()),
        Bson::String(text) => parse_date_text(text.trim()),
        _ => None,
    };
    parsed.ok_or(value)
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|at| at.and_utc())
}

/// JSON form of a stored value, with ObjectIds as hex and dates as RFC 3339
/// like the typed fields.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(at) => match DateTime::from_timestamp_millis(at.timestamp_millis()) {
            Some(at) => Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => Bson::DateTime(at).into_relaxed_extjson(),
        },
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}

impl Product {
    pub fn new(category: impl Into<String>, price: f64, rating: f64) -> Self {
        Self {
            id: ObjectId::new(),
            category: Some(category.into()),
            price: Some(price),
            rating: Some(rating),
            is_flash: Some(false),
            created_at: Some(Utc::now()),
            extra: Map::new(),
        }
    }

    pub fn flash(mut self) -> Self {
        self.is_flash = Some(true);
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn is_flash_sale(&self) -> bool {
        self.is_flash == Some(true)
    }
}

fn serialize_created_at<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

/// Raw `/products` query string.
///
/// Values stay strings so an unparsable number can be reported by name
/// instead of failing the whole extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact category match
    pub category: Option<String>,
    /// Minimum rating (inclusive)
    pub rating: Option<String>,
    /// Maximum price (inclusive)
    pub price: Option<String>,
}

/// Typed catalog predicate. All present constraints must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_rating: Option<f64>,
    pub max_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mongodb::bson::{self, doc};
    use serde_json::json;

    #[test]
    fn test_product_json_shape() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let product = Product::new("toys", 19.5, 4.0)
            .flash()
            .created(at)
            .with_field("name", json!("Rattle"));

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["_id"], json!(product.id.to_hex()));
        assert_eq!(value["isFlash"], json!(true));
        assert_eq!(value["createdAt"], json!("2024-05-01T12:00:00.000Z"));
        assert_eq!(value["name"], json!("Rattle"));
    }

    #[test]
    fn test_product_from_bson_keeps_unknown_fields() {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "category": "diapers",
            "price": 12,
            "rating": 4.5,
            "isFlash": true,
            "createdAt": bson::DateTime::from_millis(1_714_564_800_000),
            "name": "Night Pack",
        };

        let product: Product = bson::from_document(document).unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.price, Some(12.0));
        assert!(product.is_flash_sale());
        assert_eq!(
            product.created_at.unwrap().timestamp_millis(),
            1_714_564_800_000
        );
        assert_eq!(product.extra.get("name"), Some(&json!("Night Pack")));
    }

    #[test]
    fn test_product_accepts_string_created_at() {
        let document = doc! {
            "_id": ObjectId::new(),
            "createdAt": "2024-05-01T12:00:00Z",
        };

        let product: Product = bson::from_document(document).unwrap();
        assert_eq!(
            product.created_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_loose_typed_fields_are_coerced() {
        let document = doc! {
            "_id": ObjectId::new(),
            "price": "12.99",
            "rating": " 4 ",
            "createdAt": "2024-05-01",
            "isFlash": true,
        };

        let product: Product = bson::from_document(document).unwrap();
        assert_eq!(product.price, Some(12.99));
        assert_eq!(product.rating, Some(4.0));
        assert_eq!(
            product.created_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert!(product.extra.is_empty());
    }

    #[test]
    fn test_unparsable_typed_fields_fall_back_to_extra() {
        let document = doc! {
            "_id": ObjectId::new(),
            "category": 7,
            "price": "call us",
            "rating": null,
            "isFlash": "yes",
            "createdAt": "last spring",
        };

        let product: Product = bson::from_document(document).unwrap();
        assert_eq!(product.category, None);
        assert_eq!(product.price, None);
        assert_eq!(product.rating, None);
        assert_eq!(product.is_flash, None);
        assert_eq!(product.created_at, None);
        assert!(!product.extra.contains_key("rating"));

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["category"], json!(7));
        assert_eq!(value["price"], json!("call us"));
        assert_eq!(value["isFlash"], json!("yes"));
        assert_eq!(value["createdAt"], json!("last spring"));
    }

    #[test]
    fn test_missing_or_bad_id_is_malformed() {
        assert!(Product::try_from(doc! { "price": 1.0 }).is_err());
        assert!(Product::try_from(doc! { "_id": 42 }).is_err());
        assert!(Product::try_from(doc! { "_id": "not-hex" }).is_err());

        let id = ObjectId::new();
        let product = Product::try_from(doc! { "_id": id.to_hex() }).unwrap();
        assert_eq!(product.id, id);
    }

    #[test]
    fn test_nested_object_ids_render_as_hex() {
        let brand = ObjectId::new();
        let sku = ObjectId::new();
        let document = doc! {
            "_id": ObjectId::new(),
            "brandId": brand,
            "variants": [{ "sku": sku, "size": "M" }],
            "restockedAt": bson::DateTime::from_millis(1_714_564_800_000),
        };

        let product: Product = bson::from_document(document).unwrap();
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["brandId"], json!(brand.to_hex()));
        assert_eq!(value["variants"][0]["sku"], json!(sku.to_hex()));
        assert_eq!(value["variants"][0]["size"], json!("M"));
        assert_eq!(value["restockedAt"], json!("2024-05-01T12:00:00.000Z"));
    }

    #[test]
    fn test_json_round_trip_keeps_product() {
        let product = Product::new("toys", 19.5, 4.0).with_field("name", json!("Rattle"));
        let value = serde_json::to_value(&product).unwrap();
        let back: Product = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, product.id);
        assert_eq!(back.price, Some(19.5));
        assert_eq!(back.extra.get("name"), Some(&json!("Rattle")));
    }
}
