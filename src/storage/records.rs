// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Record store: the whole catalog lives in a single JSON file.
//!
//! Every read parses the full file and every write rewrites it. Catalogs are
//! small and writes are human-driven, so there is no index or append log.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::models::AppRecord;

use super::{ensure_writable, StorageError, StorageResult};

/// Ordered sequence of app records backed by one JSON file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fails unless the directory holding the catalog accepts writes.
    pub fn check_writable(&self) -> StorageResult<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => ensure_writable(parent),
            _ => ensure_writable(Path::new(".")),
        }
    }

    /// Load the full catalog. A missing file is an empty catalog.
    pub fn load_all(&self) -> StorageResult<Vec<AppRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the catalog with `records`, pretty-printed.
    ///
    /// Written to a temp file first, then renamed over the old one so a
    /// failed write never leaves a truncated catalog behind.
    pub fn save_all(&self, records: &[AppRecord]) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let written = write_pretty(&temp_path, records);
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

fn write_pretty(path: &Path, records: &[AppRecord]) -> StorageResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records).map_err(StorageError::Serialization)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}
