// src/store/error.rs

//! Error types for the recipe store

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`RecipeStore`](super::RecipeStore) operations.
///
/// A missing recipe is not an error; lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Recipe storage unavailable at {path:?}: {source}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Recipe storage at {path:?} is not a valid recipe collection: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not generate a unique recipe id after {attempts} attempts")]
    IdExhausted { attempts: usize },

    #[error("Failed to acquire writer lock at {path:?}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CorruptData {
            path: path.into(),
            source,
        }
    }

    /// Short machine-readable kind, used in logs and problem documents
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => "storage_unavailable",
            Self::CorruptData { .. } => "corrupt_data",
            Self::IdExhausted { .. } => "id_exhausted",
            Self::LockFailed { .. } => "lock_failed",
        }
    }
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
