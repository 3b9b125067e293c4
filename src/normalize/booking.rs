use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    coerce_id, coerce_id_at, coerce_number, coerce_opt_string, coerce_string, coerce_string_or, passthrough,
    scalar_to_string, Normalize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub status: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub provider_id: String,
    pub provider_name: String,
    pub service_id: String,
    pub service_name: String,
    pub scheduled_at: Option<String>,
    pub address: String,
    pub amount: f64,
    pub payment_status: String,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
}

impl Normalize for Booking {
    const LIST_KEYS: &'static [&'static str] = &["bookings", "data.bookings", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.booking", "booking", "data"];

    fn from_value(raw: &Value) -> Self {
        Self {
            id: coerce_id(raw),
            status: coerce_string_or(raw, &["status", "bookingStatus"], "pending").to_lowercase(),
            customer_id: coerce_id_at(raw, &["customerId", "customer._id", "customer.id", "customer", "user._id", "user"]),
            customer_name: coerce_string(raw, &["customerName", "customer.name", "customer.fullName", "user.name"]),
            customer_email: coerce_string(raw, &["customerEmail", "customer.email", "user.email"]),
            provider_id: coerce_id_at(raw, &["providerId", "provider._id", "provider.id", "provider"]),
            provider_name: coerce_string(raw, &["providerName", "provider.name", "provider.businessName"]),
            service_id: coerce_id_at(raw, &["serviceId", "service._id", "service.id", "service"]),
            service_name: coerce_string(raw, &["serviceName", "service.name", "service.title"]),
            scheduled_at: coerce_opt_string(raw, &["scheduledAt", "scheduledDate", "date", "slot.start"]),
            address: format_address(raw),
            amount: coerce_number(raw, &["amount", "totalAmount", "total", "price"]),
            payment_status: coerce_string_or(raw, &["paymentStatus", "payment.status"], "unpaid").to_lowercase(),
            created_at: coerce_opt_string(raw, &["createdAt", "created_at"]),
            notes: passthrough(raw, &["notes"]),
        }
    }
}

/// Addresses arrive either as a single line or as `{ line1, city, ... }`.
fn format_address(raw: &Value) -> String {
    match raw.get("address") {
        Some(Value::Object(parts)) => ["line1", "line2", "street", "city", "state", "pincode", "zip"]
            .iter()
            .filter_map(|k| parts.get(*k).and_then(scalar_to_string))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => coerce_string(raw, &["address", "location"]),
    }
}
