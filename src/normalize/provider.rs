use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    coerce_bool, coerce_id, coerce_integer, coerce_number, coerce_string, coerce_string_or, passthrough, Normalize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub rating: f64,
    pub review_count: i64,
    pub completed_jobs: i64,
    pub verified: bool,
    pub active: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Value>,
}

impl Normalize for Provider {
    const LIST_KEYS: &'static [&'static str] = &["providers", "data.providers", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.provider", "provider", "data"];

    fn from_value(raw: &Value) -> Self {
        Self {
            id: coerce_id(raw),
            name: coerce_string(raw, &["name", "fullName", "businessName", "user.name"]),
            email: coerce_string(raw, &["email", "user.email"]),
            phone: coerce_string(raw, &["phone", "mobile", "user.phone"]),
            rating: coerce_number(raw, &["rating", "averageRating", "ratings.average"]),
            review_count: coerce_integer(raw, &["reviewCount", "reviewsCount", "ratings.count"]),
            completed_jobs: coerce_integer(raw, &["completedJobs", "jobsCompleted", "completedBookings"]),
            verified: coerce_bool(raw, &["verified", "isVerified", "kycVerified"], false),
            active: coerce_bool(raw, &["active", "isActive"], true),
            status: coerce_string_or(raw, &["status", "approvalStatus"], "pending").to_lowercase(),
            avatar: passthrough(raw, &["avatar", "profileImage", "photo"]),
            categories: passthrough(raw, &["categories", "skills"]),
        }
    }
}
