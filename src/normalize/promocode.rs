use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    coerce_bool, coerce_id, coerce_integer, coerce_number, coerce_opt_string, coerce_string, coerce_string_or,
    Normalize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promocode {
    pub id: String,
    pub code: String,
    pub description: String,
    pub discount_type: String,
    pub discount_value: f64,
    pub min_order_amount: f64,
    pub max_discount: f64,
    pub usage_limit: i64,
    pub used_count: i64,
    pub valid_from: Option<String>,
    pub valid_until: Option<String>,
    pub active: bool,
}

impl Normalize for Promocode {
    // `{ success, promocodes }` is the most common backend shape
    const LIST_KEYS: &'static [&'static str] =
        &["promocodes", "data.promocodes", "promoCodes", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.promocode", "promocode", "promoCode", "data"];

    fn from_value(raw: &Value) -> Self {
        Self {
            id: coerce_id(raw),
            code: coerce_string(raw, &["code", "promoCode"]),
            description: coerce_string(raw, &["description"]),
            discount_type: coerce_string_or(raw, &["discountType", "type"], "percentage").to_lowercase(),
            discount_value: coerce_number(raw, &["discountValue", "discount", "value", "amount"]),
            min_order_amount: coerce_number(raw, &["minOrderAmount", "minOrderValue", "minAmount"]),
            max_discount: coerce_number(raw, &["maxDiscount", "maxDiscountAmount"]),
            usage_limit: coerce_integer(raw, &["usageLimit", "maxUses", "limit"]),
            used_count: coerce_integer(raw, &["usedCount", "usageCount", "timesUsed"]),
            valid_from: coerce_opt_string(raw, &["validFrom", "startDate", "startsAt"]),
            valid_until: coerce_opt_string(raw, &["validUntil", "expiresAt", "expiryDate", "endDate"]),
            active: coerce_bool(raw, &["active", "isActive"], true),
        }
    }
}
