//! Categories and the services listed under them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    coerce_bool, coerce_id, coerce_id_at, coerce_integer, coerce_number, coerce_slug, coerce_string, passthrough,
    Normalize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub active: bool,
    pub service_count: i64,
    pub sort_order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
}

impl Normalize for Category {
    const LIST_KEYS: &'static [&'static str] = &["categories", "data.categories", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.category", "category", "data"];

    fn from_value(raw: &Value) -> Self {
        let name = coerce_string(raw, &["name", "title"]);
        Self {
            id: coerce_id(raw),
            slug: coerce_slug(raw, &name),
            description: coerce_string(raw, &["description"]),
            active: coerce_bool(raw, &["active", "isActive"], true),
            service_count: coerce_integer(raw, &["serviceCount", "servicesCount", "services_count", "count"]),
            sort_order: coerce_integer(raw, &["sortOrder", "order", "position"]),
            icon: passthrough(raw, &["icon"]),
            image: passthrough(raw, &["image", "imageUrl"]),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_id: String,
    pub category_name: String,
    pub price: f64,
    pub duration_minutes: i64,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
}

impl Normalize for Service {
    const LIST_KEYS: &'static [&'static str] = &["services", "data.services", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.service", "service", "data"];

    fn from_value(raw: &Value) -> Self {
        let name = coerce_string(raw, &["name", "title"]);
        Self {
            id: coerce_id(raw),
            slug: coerce_slug(raw, &name),
            description: coerce_string(raw, &["description"]),
            category_id: coerce_id_at(raw, &["categoryId", "category._id", "category.id", "category"]),
            category_name: coerce_string(raw, &["categoryName", "category.name"]),
            price: coerce_number(raw, &["price", "basePrice", "amount"]),
            duration_minutes: coerce_integer(raw, &["durationMinutes", "duration", "duration_minutes"]),
            active: coerce_bool(raw, &["active", "isActive"], true),
            image: passthrough(raw, &["image", "imageUrl"]),
            tags: passthrough(raw, &["tags"]),
            name,
        }
    }
}
