use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{coerce_id, coerce_integer, coerce_number, coerce_opt_string, coerce_string, coerce_string_or, Normalize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    pub total_earnings: f64,
    pub platform_commission: f64,
    pub provider_payouts: f64,
    pub pending_payouts: f64,
    pub booking_count: i64,
    pub currency: String,
}

impl Normalize for EarningsSummary {
    const LIST_KEYS: &'static [&'static str] = &[];
    const RECORD_KEYS: &'static [&'static str] = &["data.summary", "summary", "data"];

    fn from_value(raw: &Value) -> Self {
        Self {
            total_earnings: coerce_number(raw, &["totalEarnings", "total", "grossRevenue", "revenue"]),
            platform_commission: coerce_number(raw, &["platformCommission", "commission", "platformFee"]),
            provider_payouts: coerce_number(raw, &["providerPayouts", "paidOut", "payouts"]),
            pending_payouts: coerce_number(raw, &["pendingPayouts", "pendingPayout", "pending"]),
            booking_count: coerce_integer(raw, &["bookingCount", "totalBookings", "count"]),
            currency: coerce_string_or(raw, &["currency"], "INR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningTransaction {
    pub id: String,
    pub booking_id: String,
    pub provider_name: String,
    pub amount: f64,
    pub commission: f64,
    pub status: String,
    pub created_at: Option<String>,
}

impl Normalize for EarningTransaction {
    const LIST_KEYS: &'static [&'static str] =
        &["transactions", "data.transactions", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.transaction", "transaction", "data"];

    fn from_value(raw: &Value) -> Self {
        Self {
            id: coerce_id(raw),
            booking_id: coerce_string(raw, &["bookingId", "booking._id", "booking.id", "booking"]),
            provider_name: coerce_string(raw, &["providerName", "provider.name", "provider.businessName"]),
            amount: coerce_number(raw, &["amount", "total"]),
            commission: coerce_number(raw, &["commission", "platformFee", "fee"]),
            status: coerce_string_or(raw, &["status"], "pending").to_lowercase(),
            created_at: coerce_opt_string(raw, &["createdAt", "created_at", "date"]),
        }
    }
}
