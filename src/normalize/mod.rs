//! Coercion of heterogeneous backend payloads into one shape per resource.
//!
//! Every helper takes an ordered list of candidate paths (dotted for nested
//! objects, `""` for the value itself) and degrades to a default instead of
//! failing. Output field names are always the first candidate probed, which
//! keeps normalization idempotent.

use serde::Serialize;
use serde_json::Value;

pub mod booking;
pub mod catalog;
pub mod customer;
pub mod earnings;
pub mod notification;
pub mod promocode;
pub mod provider;

pub use booking::Booking;
pub use catalog::{Category, Service};
pub use customer::CustomerSummary;
pub use earnings::{EarningTransaction, EarningsSummary};
pub use notification::Notification;
pub use promocode::Promocode;
pub use provider::Provider;

/// A resource family with a canonical shape.
pub trait Normalize: Sized + Serialize {
    /// Candidate locations of the item list, in priority order.
    const LIST_KEYS: &'static [&'static str];
    /// Candidate locations of a single record, in priority order.
    const RECORD_KEYS: &'static [&'static str];

    fn from_value(raw: &Value) -> Self;

    fn normalize_list(raw: &Value) -> Vec<Self> {
        extract_list(raw, Self::LIST_KEYS).iter().map(Self::from_value).collect()
    }

    fn normalize_one(raw: &Value) -> Self {
        Self::from_value(extract_record(raw, Self::RECORD_KEYS))
    }
}

/// Walk a dotted path; `""` is the value itself.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(raw);
    }
    path.split('.').try_fold(raw, |current, key| current.get(key))
}

fn first_present<'a>(raw: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|p| lookup(raw, p).filter(|v| !v.is_null()))
}

/// First candidate that is an array; empty when none is.
pub fn extract_list<'a>(raw: &'a Value, keys: &[&str]) -> &'a [Value] {
    keys.iter()
        .find_map(|k| lookup(raw, k).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// First candidate that is an object; the payload itself otherwise.
pub fn extract_record<'a>(raw: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .find_map(|k| lookup(raw, k).filter(|v| v.is_object()))
        .unwrap_or(raw)
}

/// Pagination block, passed through untouched.
pub fn extract_pagination(raw: &Value) -> Option<Value> {
    ["pagination", "data.pagination", "meta.pagination"]
        .iter()
        .find_map(|k| lookup(raw, k).filter(|v| v.is_object()))
        .cloned()
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `id ?? _id ?? ""`, accepting numbers and `{ "$oid": ... }`.
pub fn coerce_id(raw: &Value) -> String {
    coerce_id_at(raw, &["id", "_id"])
}

pub fn coerce_id_at(raw: &Value, paths: &[&str]) -> String {
    paths
        .iter()
        .filter_map(|p| lookup(raw, p))
        .find_map(|v| match v {
            Value::Object(map) => map.get("$oid").and_then(scalar_to_string),
            other => scalar_to_string(other),
        })
        .unwrap_or_default()
}

pub fn coerce_string(raw: &Value, paths: &[&str]) -> String {
    coerce_opt_string(raw, paths).unwrap_or_default()
}

/// First present scalar rendered as a string. Objects and arrays are skipped.
pub fn coerce_opt_string(raw: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().filter_map(|p| lookup(raw, p)).find_map(scalar_to_string)
}

/// Like [`coerce_string`] with a fallback for absent or blank values.
pub fn coerce_string_or(raw: &Value, paths: &[&str], default: &str) -> String {
    coerce_opt_string(raw, paths)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn as_finite(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// First candidate that parses to a finite number, else 0.
pub fn coerce_number(raw: &Value, paths: &[&str]) -> f64 {
    paths
        .iter()
        .filter_map(|p| lookup(raw, p))
        .find_map(as_finite)
        .unwrap_or(0.0)
}

pub fn coerce_integer(raw: &Value, paths: &[&str]) -> i64 {
    coerce_number(raw, paths).trunc() as i64
}

/// Only real JSON booleans count; anything else yields `default`.
pub fn coerce_bool(raw: &Value, paths: &[&str], default: bool) -> bool {
    match first_present(raw, paths) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

pub fn passthrough(raw: &Value, paths: &[&str]) -> Option<Value> {
    first_present(raw, paths).cloned()
}

/// Lowercase, drop quotes, collapse non-alphanumerics into single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for c in input.chars().flat_map(char::to_lowercase) {
        if matches!(c, '\'' | '"' | '`' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}') {
            continue;
        }
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Upstream slug when present, otherwise derived from `name`.
pub fn coerce_slug(raw: &Value, name: &str) -> String {
    coerce_opt_string(raw, &["slug"])
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| slugify(name))
}
