//! # Gallery Content
//!
//! View model aggregation for the gallery site. Raw documents are read from
//! a [`DocumentStore`](gallery_persistence::DocumentStore), cross-collection
//! references are resolved, heterogeneous dates are normalized, and the
//! result is shaped into the listings and detail pages the site renders.
//!
//! ## Modules
//!
//! - [`fetcher`]: logged reads returning [`Record`]s
//! - [`resolver`]: best-effort, order-preserving reference resolution
//! - [`temporal`]: the [`Temporal`] normalizer
//! - [`view`]: display policies, view models and the [`Gallery`] builder
//! - [`inquiry`] and [`relay`]: acquisition inquiries and email delivery
//! - [`guard`]: stale-response guarding
//! - [`backfill`]: the artwork field backfill
//!
//! ## Quick start
//!
//! ```ignore
//! use gallery_content::Gallery;
//! use gallery_persistence::backends::memory::MemoryStore;
//!
//! let gallery = Gallery::new(MemoryStore::new());
//! let highlights = gallery.highlights().await;
//! assert!(highlights.error.is_none());
//! ```

pub mod backfill;
pub mod fetcher;
pub mod guard;
pub mod inquiry;
pub mod model;
pub mod relay;
pub mod resolver;
pub mod temporal;
pub mod view;

pub use backfill::{BackfillOptions, BackfillReport, backfill_artworks};
pub use fetcher::{FetchError, FetchResult, Fetcher};
pub use guard::{Generation, LatestView, Ticket};
pub use inquiry::{InquiryError, InquiryPayload, InquiryReceipt, InquirySettings, submit_inquiry};
pub use model::Record;
pub use relay::{DisabledRelay, EmailRelay, HttpRelay, Notification, RelayError};
pub use resolver::{Resolution, find_referencing, resolve_ids, resolve_references};
pub use temporal::{Temporal, to_comparable_instant, to_comparable_year};
pub use view::{Gallery, Listing};
