//! Backend identification.

use std::fmt;
use std::str::FromStr;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Process-local map, lost on restart.
    Memory,
    /// SQLite database (file-based or in-memory).
    Sqlite,
}

impl BackendKind {
    /// Chooses a backend from a database URL.
    ///
    /// `memory` (or no URL) selects the in-memory store; anything else is
    /// treated as a SQLite path, including `:memory:`.
    pub fn from_database_url(url: Option<&str>) -> Self {
        match url {
            None | Some("memory") | Some("mem://") => BackendKind::Memory,
            Some(_) => BackendKind::Sqlite,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}
