// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storage error type shared by the record and blob stores.

use std::io;
use std::path::PathBuf;

/// Error type for storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations
    Io(io::Error),
    /// The catalog file exists but is not a JSON array of objects
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Serializing the catalog failed
    Serialization(serde_json::Error),
    /// A blob path that does not point at a single file under the uploads dir
    InvalidBlobPath(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Corrupt { path, source } => {
                write!(f, "Corrupt catalog file {}: {source}", path.display())
            }
            StorageError::Serialization(e) => write!(f, "Serialization error: {e}"),
            StorageError::InvalidBlobPath(path) => write!(f, "Invalid blob path: {path}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Corrupt { source, .. } => Some(source),
            StorageError::Serialization(e) => Some(e),
            StorageError::InvalidBlobPath(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
