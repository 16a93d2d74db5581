use serde_json::{json, Value};

use super::{Collection, MIN_DURATION_MINUTES};

/// Field descriptions for every collection, served to admin tooling
pub fn collection_schemas() -> Value {
    let mut schemas = serde_json::Map::new();
    for collection in Collection::ALL {
        schemas.insert(collection.to_string(), collection_schema(collection));
    }
    Value::Object(schemas)
}

pub fn collection_schema(collection: Collection) -> Value {
    match collection {
        Collection::Service => object_schema(
            "Service",
            json!({
                "name": {"type": "string", "description": "Service or zone name"},
                "category": {"type": "string", "description": "e.g., Oksels, Bikinilijn, Benen, Gezicht, Armen, Full Body"},
                "code": {"type": "string", "description": "Unique code for the zone"},
                "price_single": {"type": "number", "minimum": 0, "description": "Single session price in EUR"},
                "price_package_6x": {"type": ["number", "null"], "minimum": 0, "description": "Price for 6 sessions (optional)"},
                "duration_min": {"type": "integer", "minimum": MIN_DURATION_MINUTES, "description": "Estimated duration in minutes"},
            }),
            &["name", "category", "code", "price_single", "duration_min"],
        ),
        Collection::Package => object_schema(
            "Package",
            json!({
                "title": {"type": "string"},
                "description": {"type": ["string", "null"]},
                "code": {"type": "string"},
                "included_codes": {"type": "array", "items": {"type": "string"}, "description": "List of service codes included"},
                "price_single": {"type": "number", "minimum": 0},
                "promo_6_plus_2": {"type": "boolean", "default": true, "description": "Whether 6+2 promo applies"},
            }),
            &["title", "code", "included_codes", "price_single"],
        ),
        Collection::Booking => object_schema(
            "Booking",
            json!({
                "type": {"type": "string", "enum": ["intake", "behandeling"]},
                "name": {"type": "string"},
                "email": {"type": "string", "format": "email"},
                "phone": {"type": "string"},
                "date": {"type": "string", "description": "ISO date (YYYY-MM-DD)"},
                "time": {"type": "string", "description": "HH:MM"},
                "selected_codes": {"type": "array", "items": {"type": "string"}, "default": []},
                "notes": {"type": ["string", "null"]},
                "created_at": {"type": ["string", "null"], "format": "date-time"},
            }),
            &["type", "name", "email", "phone", "date", "time"],
        ),
        Collection::Inquiry => object_schema(
            "Inquiry",
            json!({
                "name": {"type": "string"},
                "email": {"type": "string", "format": "email"},
                "phone": {"type": ["string", "null"]},
                "subject": {"type": "string"},
                "message": {"type": "string"},
                "created_at": {"type": ["string", "null"], "format": "date-time"},
            }),
            &["name", "email", "subject", "message"],
        ),
        Collection::Special => object_schema(
            "Special",
            json!({
                "title": {"type": "string"},
                "description": {"type": ["string", "null"]},
                "code": {"type": "string"},
                "price": {"type": ["number", "null"]},
                "old_price": {"type": ["number", "null"]},
                "ends_at": {"type": ["string", "null"], "description": "ISO date"},
            }),
            &["title", "code"],
        ),
        Collection::Faq => object_schema(
            "FAQ",
            json!({
                "question": {"type": "string"},
                "answer": {"type": "string"},
            }),
            &["question", "answer"],
        ),
    }
}

fn object_schema(title: &str, properties: Value, required: &[&str]) -> Value {
    json!({
        "title": title,
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
