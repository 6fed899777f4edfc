//! DocumentStore implementation for SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, ToSql, params};
use serde_json::Value;
use tracing::debug;

use crate::core::{DocumentStore, validate_collection, validate_field};
use crate::error::{BackendError, StorageError, StorageResult, ValidationError};
use crate::types::{Document, DocumentPatch};

use super::SqliteStore;

fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

fn serialization_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::SerializationError { message })
}

/// Builds the JSON path for a top-level field.
fn field_path(field: &str) -> String {
    format!("$.\"{}\"", field)
}

fn decode_row(collection: &str, id: String, data: &str) -> StorageResult<Document> {
    let value: Value = serde_json::from_str(data).map_err(|e| {
        serialization_error(format!(
            "Failed to deserialize {}/{}: {}",
            collection, id, e
        ))
    })?;
    Document::from_value(id.clone(), value).ok_or_else(|| {
        StorageError::Validation(ValidationError::NotAnObject {
            collection: collection.to_string(),
            id,
        })
    })
}

fn encode_document(document: &Document) -> StorageResult<String> {
    serde_json::to_string(document.fields()).map_err(|e| {
        serialization_error(format!(
            "Failed to serialize document {}: {}",
            document.id(),
            e
        ))
    })
}

impl SqliteStore {
    fn query_documents(
        &self,
        collection: &str,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> StorageResult<Vec<Document>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| internal_error(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params, |row| {
                let id: String = row.get(0)?;
                let data: String = row.get(1)?;
                Ok((id, data))
            })
            .map_err(|e| internal_error(format!("Failed to query {}: {}", collection, e)))?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, data) =
                row.map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;
            documents.push(decode_row(collection, id, &data)?);
        }
        Ok(documents)
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_all(&self, collection: &str) -> StorageResult<Vec<Document>> {
        validate_collection(collection)?;
        self.query_documents(
            collection,
            "SELECT id, data FROM documents WHERE collection = ?1 ORDER BY id",
            params![collection],
        )
    }

    async fn fetch_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StorageResult<Vec<Document>> {
        validate_collection(collection)?;
        validate_field(field)?;
        let path = field_path(field);

        // Narrow in SQL, then apply exact JSON equality on the decoded rows.
        let candidates = match value {
            Value::String(s) => self.query_documents(
                collection,
                "SELECT id, data FROM documents
                 WHERE collection = ?1
                   AND json_type(data, ?2) = 'text'
                   AND json_extract(data, ?2) = ?3
                 ORDER BY id",
                params![collection, path, s],
            )?,
            Value::Bool(b) => {
                let json_type = if *b { "true" } else { "false" };
                self.query_documents(
                    collection,
                    "SELECT id, data FROM documents
                     WHERE collection = ?1 AND json_type(data, ?2) = ?3
                     ORDER BY id",
                    params![collection, path, json_type],
                )?
            }
            _ => self.query_documents(
                collection,
                "SELECT id, data FROM documents
                 WHERE collection = ?1 AND json_type(data, ?2) IS NOT NULL
                 ORDER BY id",
                params![collection, path],
            )?,
        };

        Ok(candidates
            .into_iter()
            .filter(|doc| doc.get(field) == Some(value))
            .collect())
    }

    async fn fetch_by_id(&self, collection: &str, id: &str) -> StorageResult<Option<Document>> {
        validate_collection(collection)?;
        let conn = self.get_connection()?;

        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| internal_error(format!("Failed to read document: {}", e)))?;

        data.map(|data| decode_row(collection, id.to_string(), &data))
            .transpose()
    }

    async fn put(&self, collection: &str, document: Document) -> StorageResult<()> {
        validate_collection(collection)?;
        if document.id().is_empty() {
            return Err(ValidationError::EmptyId {
                collection: collection.to_string(),
            }
            .into());
        }

        let data = encode_document(&document)?;
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO documents (collection, id, data, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(collection, id) DO UPDATE
             SET data = excluded.data, updated_at = excluded.updated_at",
            params![collection, document.id(), data, Utc::now().to_rfc3339()],
        )
        .map_err(|e| internal_error(format!("Failed to write document: {}", e)))?;

        Ok(())
    }

    async fn merge_batch(
        &self,
        collection: &str,
        patches: &[DocumentPatch],
    ) -> StorageResult<usize> {
        validate_collection(collection)?;
        let mut conn = self.get_connection()?;
        let tx = conn
            .transaction()
            .map_err(|e| internal_error(format!("Failed to begin transaction: {}", e)))?;

        let now = Utc::now().to_rfc3339();
        let mut written = 0;
        for patch in patches.iter().filter(|p| !p.is_empty()) {
            let data: Option<String> = tx
                .query_row(
                    "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
                    params![collection, patch.id],
                    |row| row.get(0),
                )
                .optional()
                .map_err(|e| internal_error(format!("Failed to read document: {}", e)))?;

            let Some(data) = data else {
                continue;
            };

            let mut document = decode_row(collection, patch.id.clone(), &data)?;
            document.merge(&patch.fields);
            let encoded = encode_document(&document)?;

            tx.execute(
                "UPDATE documents SET data = ?3, updated_at = ?4
                 WHERE collection = ?1 AND id = ?2",
                params![collection, patch.id, encoded, now],
            )
            .map_err(|e| internal_error(format!("Failed to update document: {}", e)))?;
            written += 1;
        }

        tx.commit()
            .map_err(|e| internal_error(format!("Failed to commit batch: {}", e)))?;

        debug!(
            collection = %collection,
            patches = patches.len(),
            written,
            "Committed merge batch"
        );

        Ok(written)
    }

    async fn count(&self, collection: &str) -> StorageResult<u64> {
        validate_collection(collection)?;
        let conn = self.get_connection()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                [collection],
                |row| row.get(0),
            )
            .map_err(|e| internal_error(format!("Failed to count documents: {}", e)))?;
        Ok(count as u64)
    }

    async fn health_check(&self) -> StorageResult<()> {
        let conn = self.get_connection().map_err(|_| {
            StorageError::Backend(BackendError::Unavailable {
                backend_name: "sqlite".to_string(),
                message: "Failed to get connection".to_string(),
            })
        })?;
        conn.query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|e| internal_error(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
