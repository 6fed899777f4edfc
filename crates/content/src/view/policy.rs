//! Display policies shared by every listing.
//!
//! Filtering, ordering and fallback rules live here so listing pages never
//! re-derive them from raw records.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::Record;
use crate::temporal::to_comparable_instant;

/// Image shown when a record has none of its own.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/800x600?text=Maison+Atelier";

/// Title shown when a record has neither `name` nor `title`.
pub const UNTITLED: &str = "Untitled";

/// Label shown for unknown event dates and times.
pub const TBD: &str = "TBD";

/// Fields read, in order, to find an event's type tags.
const TYPE_FIELDS: &[&str] = &["event_type", "eventType", "type"];

/// The featured-flag rule.
///
/// Accepts boolean `true` and the string `"true"` in any ASCII case.
pub fn is_featured(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// True if the record's `isFeatured` flag passes [`is_featured`].
pub fn is_featured_record(record: &Record) -> bool {
    is_featured(record.get("isFeatured"))
}

/// Splits a type field into trimmed, non-empty tags.
///
/// A string is split on commas; a sequence contributes its string items,
/// each of which may itself be comma-separated.
pub fn type_tags(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<&str> = match value {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    raw.into_iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// The tags of a record, read from the first type field that is present.
pub fn record_tags(record: &Record) -> Vec<String> {
    TYPE_FIELDS
        .iter()
        .find_map(|field| record.get(field))
        .map(|value| type_tags(Some(value)))
        .unwrap_or_default()
}

/// Case-insensitive tag membership.
pub fn has_tag(record: &Record, tag: &str) -> bool {
    record_tags(record)
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(tag))
}

/// Sorts most recent first. Items without a date go last.
pub fn sort_by_recency<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    // Reverse(None) compares greater than any Reverse(Some(_)).
    items.sort_by_cached_key(|item| Reverse(key(item)));
}

/// Sorts by a display name, ignoring case.
pub fn sort_alphabetically<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| key(item).to_lowercase());
}

/// banner → flyer → first gallery image → placeholder.
pub fn image_url(record: &Record) -> String {
    record
        .first_text(&["banner", "flyer"])
        .or_else(|| first_gallery_image(record))
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

fn first_gallery_image(record: &Record) -> Option<&str> {
    let url = match record.get("gallery")? {
        Value::Array(items) => match items.first()? {
            Value::Object(obj) => obj.get("url").and_then(Value::as_str),
            Value::String(url) => Some(url.as_str()),
            _ => None,
        },
        _ => None,
    };
    url.map(str::trim).filter(|url| !url.is_empty())
}

/// `name` → `title` → [`UNTITLED`].
pub fn display_title(record: &Record) -> String {
    record
        .first_text(&["name", "title"])
        .unwrap_or(UNTITLED)
        .to_string()
}

/// The public slug: the first usable slug field, else the record id.
pub fn public_slug(record: &Record, slug_fields: &[&str]) -> String {
    record
        .first_text(slug_fields)
        .unwrap_or(record.id())
        .to_string()
}

/// The latest resolvable instant among an event's `dates`, else its `date`.
pub fn event_instant(record: &Record) -> Option<DateTime<Utc>> {
    let from_dates = match record.get("dates") {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.get("date"))
            .filter_map(to_comparable_instant)
            .max(),
        _ => None,
    };
    from_dates.or_else(|| record.get("date").and_then(to_comparable_instant))
}
