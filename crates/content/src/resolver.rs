//! Cross-collection reference resolution.
//!
//! References between collections are plain id lists with no integrity
//! guarantees. Resolution is best effort: every id is looked up
//! concurrently, hits are kept in input order, and ids that are missing or
//! whose lookup fails are dropped and reported in [`Resolution::dropped`].

use futures::future::join_all;
use gallery_persistence::DocumentStore;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fetcher::{FetchResult, Fetcher};
use crate::model::Record;

/// Outcome of resolving a list of foreign ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Records that resolved, in the order their ids were listed.
    pub records: Vec<Record>,
    /// Ids that were absent from the target collection or failed to load.
    pub dropped: Vec<String>,
}

impl Resolution {
    /// True when every listed id resolved.
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Looks up `ids` in `collection` concurrently.
///
/// Never fails: lookup errors are logged and the id is dropped.
pub async fn resolve_ids<S: DocumentStore>(
    fetcher: &Fetcher<S>,
    collection: &str,
    ids: &[String],
) -> Resolution {
    let lookups = ids.iter().map(|id| fetcher.fetch_by_id(collection, id));
    let results = join_all(lookups).await;

    let mut resolution = Resolution::default();
    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(Some(record)) => resolution.records.push(record),
            Ok(None) => {
                warn!(collection = %collection, id = %id, "Dropping dangling reference");
                resolution.dropped.push(id.clone());
            }
            Err(e) => {
                warn!(collection = %collection, id = %id, error = %e, "Dropping unreadable reference");
                resolution.dropped.push(id.clone());
            }
        }
    }

    debug!(
        collection = %collection,
        requested = ids.len(),
        resolved = resolution.records.len(),
        "Resolved references"
    );
    resolution
}

/// Replaces the id list in `entity[field]` with the records it points at.
///
/// Returns the rewritten entity together with the ids that were dropped.
pub async fn resolve_references<S: DocumentStore>(
    fetcher: &Fetcher<S>,
    mut entity: Record,
    field: &str,
    target_collection: &str,
) -> (Record, Vec<String>) {
    let ids = entity.ids(field);
    let resolution = resolve_ids(fetcher, target_collection, &ids).await;
    let resolved = resolution
        .records
        .into_iter()
        .map(Record::into_value)
        .collect();
    entity.set(field, Value::Array(resolved));
    (entity, resolution.dropped)
}

/// Reads every record in `collection` whose `field` lists `id`.
///
/// Used for relations stored on the parent side, such as
/// `headquarters.exhibitions`.
pub async fn find_referencing<S: DocumentStore>(
    fetcher: &Fetcher<S>,
    collection: &str,
    field: &str,
    id: &str,
) -> FetchResult<Vec<Record>> {
    let parents = fetcher.fetch_all(collection).await?;
    Ok(parents
        .into_iter()
        .filter(|parent| lists_reference(parent, field, id))
        .collect())
}

/// Picks the first of `parents` whose `field` lists `id`.
pub fn find_parent<'a>(parents: &'a [Record], field: &str, id: &str) -> Option<&'a Record> {
    parents.iter().find(|parent| lists_reference(parent, field, id))
}

fn lists_reference(parent: &Record, field: &str, id: &str) -> bool {
    parent.ids(field).iter().any(|child| child == id)
}
