//! Artwork field backfill.
//!
//! Older artwork records predate the `price` and `availability_status`
//! fields. The backfill scans the collection once and writes the missing
//! keys through batched merges. A key that is present, even as `null`,
//! is left alone, so a second run finds nothing to do.

use gallery_persistence::{Document, DocumentPatch, DocumentStore, StorageResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::model::collections;

/// Largest number of patches sent in one merge.
pub const MAX_BATCH_SIZE: usize = 500;

/// Status written to artworks that have none.
pub const DEFAULT_AVAILABILITY: &str = "NOT_FOR_SALE";

/// Knobs for [`backfill_artworks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillOptions {
    /// Report what would change without writing.
    pub dry_run: bool,
    /// Patches per merge; clamped to `1..=MAX_BATCH_SIZE`.
    pub batch_size: usize,
}

impl Default for BackfillOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

/// What a backfill run found and did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    /// Artworks read.
    pub scanned: usize,
    /// Artworks missing at least one field.
    pub pending: usize,
    /// Artworks actually written.
    pub updated: usize,
    /// Merge batches committed.
    pub batches: usize,
}

/// Returns the patch an artwork needs, if any.
pub fn plan_patch(document: &Document) -> Option<DocumentPatch> {
    let mut patch = DocumentPatch::new(document.id());
    if !document.has_field("price") {
        patch = patch.set("price", Value::Null);
    }
    if !document.has_field("availability_status") {
        patch = patch.set(
            "availability_status",
            Value::String(DEFAULT_AVAILABILITY.to_string()),
        );
    }
    (!patch.is_empty()).then_some(patch)
}

/// Backfills `price` and `availability_status` on every artwork missing them.
pub async fn backfill_artworks<S: DocumentStore + ?Sized>(
    store: &S,
    options: BackfillOptions,
) -> StorageResult<BackfillReport> {
    let artworks = store.fetch_all(collections::ARTWORKS).await?;
    let patches: Vec<DocumentPatch> = artworks.iter().filter_map(plan_patch).collect();

    let mut report = BackfillReport {
        scanned: artworks.len(),
        pending: patches.len(),
        ..Default::default()
    };

    if options.dry_run {
        info!(
            scanned = report.scanned,
            pending = report.pending,
            "Dry run, no artworks written"
        );
        return Ok(report);
    }

    let batch_size = options.batch_size.clamp(1, MAX_BATCH_SIZE);
    for chunk in patches.chunks(batch_size) {
        let written = store.merge_batch(collections::ARTWORKS, chunk).await?;
        report.updated += written;
        report.batches += 1;
        debug!(batch = report.batches, written, "Committed artwork batch");
    }

    info!(
        scanned = report.scanned,
        updated = report.updated,
        batches = report.batches,
        "Artwork backfill complete"
    );
    Ok(report)
}
