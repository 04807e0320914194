// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Plain filesystem persistence for the catalog and the uploaded binaries.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   db.json                 # ordered array of app records, newest first
//!   uploads/
//!     {millis}-{name}.apk   # served as /uploads/{millis}-{name}.apk
//!   .uploads-staging/
//!     {millis}-{name}.apk.part  # in-progress upload, never served
//! ```
//!
//! ## Important Notes
//!
//! - There is no locking at this layer; callers serialize writers
//! - Catalog writes go through a temp file and a rename

pub mod blobs;
pub mod error;
pub mod paths;
pub mod records;

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

pub use blobs::{decode_transport_name, BlobStore, BlobWriter, StoredBlob};
pub use error::{StorageError, StorageResult};
pub use paths::StoragePaths;
pub use records::RecordStore;

/// Name of the scratch file used by [`ensure_writable`].
const WRITE_CHECK_FILE: &str = ".write-check";

/// Create `dir` if needed and prove a file can be created and removed in it.
pub(crate) fn ensure_writable(dir: &Path) -> StorageResult<()> {
    fs::create_dir_all(dir)?;
    let scratch = dir.join(WRITE_CHECK_FILE);
    File::create(&scratch)?;
    match fs::remove_file(&scratch) {
        Ok(()) => Ok(()),
        // a concurrent check already removed it
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
