// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the on-disk layout.

use std::path::{Path, PathBuf};

/// Default data root: the working directory, like the original deployment.
pub const DATA_ROOT: &str = ".";

/// File holding the ordered catalog.
pub const CATALOG_FILE: &str = "db.json";

/// Directory (under the data root) holding uploaded binaries.
pub const UPLOADS_DIR: &str = "uploads";

/// Directory (under the data root) holding in-progress uploads. It sits
/// beside `uploads/`, outside what is served, so partial files are never
/// downloadable while renames stay on one filesystem.
pub const STAGING_DIR: &str = ".uploads-staging";

/// URL prefix under which uploaded binaries are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all persisted state.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the catalog JSON file.
    pub fn catalog_file(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    /// Directory containing all uploaded blobs.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }

    /// Directory for uploads that are still being written.
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }
}
