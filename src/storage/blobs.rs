// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blob store for uploaded binaries.
//!
//! Files are stored flat under the uploads directory as
//! `<millis>-<sanitized original name>` and addressed externally as
//! `/uploads/<filename>`. Writes go to a `.part` file in a staging
//! directory that is not served and are renamed into place once complete.

use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Component, Path, PathBuf};

use crate::ids::MonotonicMillis;

use super::paths::UPLOADS_URL_PREFIX;
use super::{ensure_writable, StorageError, StorageResult};

/// Name used when the client supplied nothing usable.
const FALLBACK_NAME: &str = "upload";

/// A blob that has been fully written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Filename inside the uploads directory.
    pub filename: String,
    /// Servable path (`/uploads/<filename>`).
    pub relative_path: String,
    /// Bytes written.
    pub size: u64,
}

/// Filesystem-backed blob storage.
#[derive(Debug)]
pub struct BlobStore {
    dir: PathBuf,
    staging: PathBuf,
    prefixes: MonotonicMillis,
}

impl BlobStore {
    /// `staging` must be on the same filesystem as `dir` and must not be
    /// served.
    pub fn new(dir: impl AsRef<Path>, staging: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            staging: staging.as_ref().to_path_buf(),
            prefixes: MonotonicMillis::new(),
        }
    }

    /// Uploads directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Externally servable path for a stored filename.
    pub fn relative_path_for(filename: &str) -> String {
        format!("{UPLOADS_URL_PREFIX}{filename}")
    }

    /// Whether a `downloadUrl` points into this store.
    pub fn owns(relative_path: &str) -> bool {
        relative_path.starts_with(UPLOADS_URL_PREFIX)
    }

    /// Fails unless both the uploads and staging directories accept writes.
    pub fn check_writable(&self) -> StorageResult<()> {
        ensure_writable(&self.dir)?;
        ensure_writable(&self.staging)
    }

    /// Start writing a new blob named after `name_hint`.
    ///
    /// Creates the uploads and staging directories if needed.
    pub fn begin(&self, name_hint: &str) -> StorageResult<BlobWriter> {
        fs::create_dir_all(&self.dir)?;
        fs::create_dir_all(&self.staging)?;

        let filename = format!(
            "{}-{}",
            self.prefixes.next(),
            sanitize_name(&decode_transport_name(name_hint))
        );
        let final_path = self.dir.join(&filename);
        let temp_path = self.staging.join(format!("{filename}.part"));
        let file = File::create(&temp_path)?;

        Ok(BlobWriter {
            writer: Some(BufWriter::new(file)),
            temp_path,
            final_path,
            filename,
            size: 0,
        })
    }

    /// Persist everything `data` yields as a new blob.
    pub fn save(&self, name_hint: &str, mut data: impl Read) -> StorageResult<StoredBlob> {
        let mut writer = self.begin(name_hint)?;
        let mut buf = [0u8; 64 * 1024];
        loop {
            let n = match data.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            writer.write_chunk(&buf[..n])?;
        }
        writer.finish()
    }

    /// Resolve a `/uploads/<filename>` path to its location on disk.
    ///
    /// Only a single plain filename is accepted after the prefix.
    pub fn locate(&self, relative_path: &str) -> StorageResult<PathBuf> {
        let filename = relative_path
            .strip_prefix(UPLOADS_URL_PREFIX)
            .filter(|name| is_plain_filename(name))
            .ok_or_else(|| StorageError::InvalidBlobPath(relative_path.to_string()))?;
        Ok(self.dir.join(filename))
    }

    /// Remove a blob. Missing files are not an error.
    pub fn delete(&self, relative_path: &str) -> StorageResult<()> {
        let path = self.locate(relative_path)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-progress blob write. Dropping it without [`BlobWriter::finish`]
/// discards the partial file.
#[derive(Debug)]
pub struct BlobWriter {
    writer: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
    filename: String,
    size: u64,
}

impl BlobWriter {
    /// Append a chunk.
    pub fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("blob writer already finished"))?;
        writer.write_all(chunk)?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush and move the blob into place.
    pub fn finish(mut self) -> StorageResult<StoredBlob> {
        let writer = self
            .writer
            .take()
            .ok_or_else(|| io::Error::other("blob writer already finished"))?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&self.temp_path, &self.final_path) {
            let _ = fs::remove_file(&self.temp_path);
            return Err(e.into());
        }

        Ok(StoredBlob {
            relative_path: BlobStore::relative_path_for(&self.filename),
            filename: std::mem::take(&mut self.filename),
            size: self.size,
        })
    }
}

impl Drop for BlobWriter {
    fn drop(&mut self) {
        if self.writer.take().is_some() {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// Undo Latin-1 transport decoding of a client filename.
///
/// Some multipart decoders hand back the raw UTF-8 bytes of a filename as
/// one Latin-1 character per byte. When every character fits in a byte and
/// those bytes form valid UTF-8, the re-decoded text is the real name;
/// otherwise the input already is proper text and is returned unchanged.
pub fn decode_transport_name(raw: &str) -> String {
    if raw.is_ascii() {
        return raw.to_string();
    }

    let bytes: Option<Vec<u8>> = raw.chars().map(|c| u8::try_from(u32::from(c)).ok()).collect();
    bytes
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| raw.to_string())
}

/// Keep only the final path component and strip characters that do not
/// belong in a filename.
fn sanitize_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_control() || c == ':' { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}
