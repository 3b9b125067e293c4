use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{coerce_bool, coerce_id, coerce_opt_string, coerce_string, coerce_string_or, Normalize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub link: Option<String>,
    pub created_at: Option<String>,
}

impl Normalize for Notification {
    const LIST_KEYS: &'static [&'static str] =
        &["notifications", "data.notifications", "data.items", "data", "", "items"];
    const RECORD_KEYS: &'static [&'static str] = &["data.notification", "notification", "data"];

    fn from_value(raw: &Value) -> Self {
        Self {
            id: coerce_id(raw),
            title: coerce_string(raw, &["title", "subject"]),
            message: coerce_string(raw, &["message", "body", "text"]),
            kind: coerce_string_or(raw, &["type", "category"], "info").to_lowercase(),
            read: coerce_bool(raw, &["read", "isRead", "seen"], false),
            link: coerce_opt_string(raw, &["link", "url", "actionUrl"]),
            created_at: coerce_opt_string(raw, &["createdAt", "created_at", "timestamp"]),
        }
    }
}
