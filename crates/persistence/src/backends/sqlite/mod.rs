//! SQLite backend implementation.
//!
//! Documents are stored as JSON text, one row per document. Equality
//! filters are pushed down with `json_extract`/`json_type` and re-checked
//! against the decoded JSON, so both backends agree on what "equal" means.
//!
//! # Example
//!
//! ```no_run
//! use gallery_persistence::backends::sqlite::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open("gallery.db")?;
//! store.init_schema()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE documents (
//!     collection TEXT NOT NULL,
//!     id TEXT NOT NULL,
//!     data TEXT NOT NULL,         -- JSON object, without the id
//!     updated_at TEXT NOT NULL,   -- RFC 3339
//!     PRIMARY KEY (collection, id)
//! );
//! ```

mod backend;
mod schema;
mod storage;

pub use backend::{SqliteStore, SqliteStoreConfig};
