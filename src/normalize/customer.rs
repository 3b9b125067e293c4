use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{coerce_bool, coerce_id, coerce_integer, coerce_number, coerce_opt_string, coerce_string, Normalize};

/// Customer row as shown in the admin customer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub total_bookings: i64,
    pub total_spent: f64,
    pub last_booking_at: Option<String>,
    pub active: bool,
    pub created_at: Option<String>,
}

impl Normalize for CustomerSummary {
    const LIST_KEYS: &'static [&'static str] =
        &["customers", "data.customers", "users", "data.users", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.customer", "customer", "data.user", "user", "data"];

    fn from_value(raw: &Value) -> Self {
        let name = coerce_opt_string(raw, &["name", "fullName"]).unwrap_or_else(|| {
            let first = coerce_string(raw, &["firstName"]);
            let last = coerce_string(raw, &["lastName"]);
            format!("{} {}", first, last).trim().to_string()
        });

        Self {
            id: coerce_id(raw),
            name,
            email: coerce_string(raw, &["email"]),
            phone: coerce_string(raw, &["phone", "mobile"]),
            total_bookings: coerce_integer(raw, &["totalBookings", "bookingsCount", "bookingCount", "stats.bookings"]),
            total_spent: coerce_number(raw, &["totalSpent", "spent", "totalAmount", "stats.spent"]),
            last_booking_at: coerce_opt_string(raw, &["lastBookingAt", "lastBooking.createdAt", "lastBookingDate"]),
            active: coerce_bool(raw, &["active", "isActive"], true),
            created_at: coerce_opt_string(raw, &["createdAt", "created_at"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn customer_name_from_parts() {
        let c = CustomerSummary::from_value(&json!({"_id": "u1", "firstName": "Kiran", "lastName": "Rao", "bookingsCount": 3}));
        assert_eq!(c.name, "Kiran Rao");
        assert_eq!(c.total_bookings, 3);
        assert_eq!(CustomerSummary::from_value(&serde_json::to_value(&c).unwrap()), c);
    }

    #[test]
    fn users_key_is_accepted() {
        let list = CustomerSummary::normalize_list(&json!({"data": {"users": [{"_id": "u2", "name": "Zoya"}]}}));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Zoya");
    }
}
