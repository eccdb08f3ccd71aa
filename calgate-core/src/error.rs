//! Error types for calgate.

use thiserror::Error;

use crate::store::Store;

/// Failures talking to a downstream store.
///
/// A store that answers "not found" is not an error; lookups report that as
/// `Ok(false)` / `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection refused, DNS failure, or the request timed out.
    #[error("{store} store unreachable: {reason}")]
    Unreachable { store: Store, reason: String },

    /// The store answered, but not with anything a lookup can interpret.
    #[error("{store} store unavailable: {reason}")]
    Unavailable { store: Store, reason: String },
}

impl StoreError {
    pub fn store(&self) -> Store {
        match self {
            StoreError::Unreachable { store, .. } | StoreError::Unavailable { store, .. } => *store,
        }
    }
}

/// Errors that can occur while loading gateway configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid store URL for {store}: {reason}")]
    InvalidUrl { store: Store, reason: String },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for downstream store calls.
pub type StoreResult<T> = Result<T, StoreError>;
