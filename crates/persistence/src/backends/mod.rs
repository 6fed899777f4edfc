//! Database backend implementations.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | always | Process-local maps, for tests and local development |
//! | SQLite | `sqlite` | Embedded database, file-based or in-memory |

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;
