//! Loosely-typed records read from the document store.
//!
//! Stored documents follow no schema, so every accessor here is lenient: a
//! missing key, a `null`, or a value of the wrong JSON type all read as
//! absent instead of failing.

use gallery_persistence::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Collection names used by the content service.
pub mod collections {
    /// Artist profiles.
    pub const ARTISTS: &str = "artists";
    /// Artworks, referenced from `artists.artworks`.
    pub const ARTWORKS: &str = "artworks";
    /// Exhibitions, referenced from `headquarters.exhibitions`.
    pub const EXHIBITIONS: &str = "exhibitions";
    /// Gallery locations.
    pub const HEADQUARTERS: &str = "headquarters";
    /// Events, some of which are performances.
    pub const EVENTS: &str = "events";
    /// Dedicated performance records.
    pub const PERFORMANCES: &str = "performances";
    /// Team members and other people.
    pub const MEMBERS: &str = "members";
}

/// A fetched document with its store id merged in under `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wraps a raw field map. The map should already carry an `id` key.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The record id, or an empty string if the map has none.
    pub fn id(&self) -> &str {
        self.0.get("id").and_then(Value::as_str).unwrap_or_default()
    }

    /// Returns the raw value of a field, treating `null` as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    /// Returns a trimmed, non-empty string field.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns the first of `fields` that holds usable text.
    pub fn first_text(&self, fields: &[&str]) -> Option<&str> {
        fields.iter().find_map(|field| self.text(field))
    }

    /// Reads a sequence of strings. A lone string reads as a one-item list.
    pub fn texts(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        }
    }

    /// Reads a list of foreign ids.
    ///
    /// Entries may be plain strings or objects carrying an `id` string;
    /// anything else is skipped.
    pub fn ids(&self, field: &str) -> Vec<String> {
        let Some(Value::Array(items)) = self.get(field) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id.as_str()),
                Value::Object(obj) => obj.get("id").and_then(Value::as_str),
                _ => None,
            })
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }

    /// True only for a literal boolean `true`.
    pub fn flag(&self, field: &str) -> bool {
        matches!(self.get(field), Some(Value::Bool(true)))
    }

    /// Replaces a field.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// The underlying field map.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Converts the record back into a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Document> for Record {
    fn from(document: Document) -> Self {
        let (id, mut fields) = document.into_parts();
        fields.insert("id".to_string(), Value::String(id));
        Self(fields)
    }
}
