//! Store access layer: connection lifecycle, statement execution, errors.
//!
//! # Responsibility
//! - Own the SQLite connection handle and its bootstrap configuration.
//! - Execute parameterized statements and decode result rows.
//! - Define the error taxonomy shared by every persistence operation.
//!
//! # Invariants
//! - Every execution path fails with `StoreError::NotConnected` before a
//!   connection has been established.
//! - Store failures propagate unmodified; this layer never retries or
//!   swallows them.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod context;
pub mod executor;

pub use context::ConnectionContext;
pub use executor::{prepare_value, QueryExecutor, RowMap};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy for the persistence core.
#[derive(Debug)]
pub enum StoreError {
    /// One or more attribute names fall outside a model's declared set.
    /// `names` lists every offending attribute.
    InvalidAttributes { model: String, names: Vec<String> },
    /// A model declaration is missing one of the mandatory persistence
    /// attributes (`id`, `created_at`, `updated_at`).
    MissingRequiredAttribute { model: String, name: &'static str },
    /// A statement was issued before any connection was established.
    NotConnected,
    /// Failure surfaced by SQLite, passed through unchanged.
    Sqlite(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAttributes { model, names } => {
                write!(f, "invalid attributes for {model}: {}", names.join(", "))
            }
            Self::MissingRequiredAttribute { model, name } => {
                write!(f, "model {model} must declare the `{name}` attribute")
            }
            Self::NotConnected => write!(f, "not connected to a database"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
