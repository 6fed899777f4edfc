//! Document types.
//!
//! A [`Document`] is a schemaless JSON object plus the id the store assigned
//! to it. Collections never enforce a schema; typed access happens in the
//! layers above.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: a store-assigned id and a free-form field set.
///
/// # Examples
///
/// ```
/// use gallery_persistence::types::Document;
/// use serde_json::json;
///
/// let doc = Document::from_value("a1", json!({"name": "Lina Ayoub"})).unwrap();
/// assert_eq!(doc.id(), "a1");
/// assert_eq!(doc.get("name"), Some(&json!("Lina Ayoub")));
///
/// // The id is merged into the field set on export.
/// assert_eq!(doc.into_value(), json!({"id": "a1", "name": "Lina Ayoub"}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    fields: Map<String, Value>,
}

impl Document {
    /// Creates a document from an id and a field map.
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Creates a document from a JSON value, which must be an object.
    ///
    /// Returns `None` for any other JSON shape.
    pub fn from_value(id: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self::new(id, fields)),
            _ => None,
        }
    }

    /// Returns the store-assigned id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the stored fields (without the id).
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a single field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns true if the field key is present, even when its value is null.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Merges the given fields into this document, overwriting existing keys.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Converts the document into a JSON object with the id merged in.
    ///
    /// The store-assigned id wins over any `id` field stored in the body.
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(self.id));
        Value::Object(fields)
    }

    /// Splits the document into its id and field set.
    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.id, self.fields)
    }

    /// Same as [`Document::into_value`] but borrows.
    pub fn to_value(&self) -> Value {
        self.clone().into_value()
    }
}

/// A partial update applied to one document by id.
///
/// Patches only add or overwrite the listed keys; other fields are untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPatch {
    /// The target document id.
    pub id: String,
    /// The fields to merge.
    pub fields: Map<String, Value>,
}

impl DocumentPatch {
    /// Creates an empty patch for the given document.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Adds a field to the patch.
    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
