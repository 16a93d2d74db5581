use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Collection, Validate, ValidationError, ValidationResult};

/// A document as returned by the store, including any persistence metadata
pub type RawRecord = Map<String, Value>;

/// A single treatment zone offered by the studio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub category: String,
    pub code: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_single: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price_package_6x: Option<Decimal>,
    pub duration_min: i64,
}

/// A bundle of zones sold under one code and price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    pub included_codes: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_single: Decimal,
    #[serde(default = "default_promo_6_plus_2")]
    pub promo_6_plus_2: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Time-limited offer. Only described through the schema endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialEntry {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub ends_at: Option<String>,
}

fn default_promo_6_plus_2() -> bool {
    true
}

/// Catalog types that can be read from a store collection.
///
/// `FIELDS` is the allow-list applied to raw documents before deserialization, so
/// store metadata (`_id`, `id`, timestamps) never reaches the typed entry.
pub trait CatalogRecord: DeserializeOwned + Validate + Sized {
    const COLLECTION: Collection;
    const FIELDS: &'static [&'static str];

    /// Project, deserialize and validate a raw store document
    fn from_record(record: &RawRecord) -> ValidationResult<Self> {
        let projected = project_fields(record, Self::FIELDS);
        let entry: Self = serde_json::from_value(Value::Object(projected)).map_err(|e| {
            ValidationError::MalformedRecord {
                message: format!("{}: {}", Self::COLLECTION, e),
            }
        })?;
        entry.validate()?;
        Ok(entry)
    }
}

impl CatalogRecord for ServiceEntry {
    const COLLECTION: Collection = Collection::Service;
    const FIELDS: &'static [&'static str] = &[
        "name",
        "category",
        "code",
        "price_single",
        "price_package_6x",
        "duration_min",
    ];
}

impl CatalogRecord for PackageEntry {
    const COLLECTION: Collection = Collection::Package;
    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "code",
        "included_codes",
        "price_single",
        "promo_6_plus_2",
    ];
}

impl CatalogRecord for FaqEntry {
    const COLLECTION: Collection = Collection::Faq;
    const FIELDS: &'static [&'static str] = &["question", "answer"];
}

impl CatalogRecord for SpecialEntry {
    const COLLECTION: Collection = Collection::Special;
    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "code",
        "price",
        "old_price",
        "ends_at",
    ];
}

/// Keep only the allow-listed keys of a raw record
pub fn project_fields(record: &RawRecord, fields: &[&str]) -> RawRecord {
    record
        .iter()
        .filter(|(key, _)| fields.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
