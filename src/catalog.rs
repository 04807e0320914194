// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog service: list/create/update/delete app entries.
//!
//! Orchestrates the [`RecordStore`] and the [`BlobStore`]. Every mutation is
//! a full load-modify-save cycle on the catalog file, serialized by a mutex
//! so concurrent requests inside one process cannot lose each other's
//! writes. Nothing protects against a second process writing the same file.

use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use crate::ids::{now_millis, MonotonicMillis};
use crate::models::{AppFields, AppRecord, UploadResult};
use crate::storage::{decode_transport_name, BlobStore, RecordStore, StorageError, StoredBlob};

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No record with this id.
    #[error("App not found: {0}")]
    NotFound(String),

    /// Reading or writing the catalog failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// App catalog backed by a record store and a blob store.
pub struct CatalogService {
    records: RecordStore,
    blobs: BlobStore,
    ids: MonotonicMillis,
    write_lock: Mutex<()>,
}

impl CatalogService {
    pub fn new(records: RecordStore, blobs: BlobStore) -> Self {
        Self {
            records,
            blobs,
            ids: MonotonicMillis::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All records, newest first, exactly as persisted.
    pub fn list_apps(&self) -> CatalogResult<Vec<AppRecord>> {
        let _guard = self.lock();
        Ok(self.records.load_all()?)
    }

    /// Create a record from caller fields and put it at the head of the catalog.
    pub fn create_app(&self, fields: AppFields) -> CatalogResult<AppRecord> {
        let _guard = self.lock();
        let mut apps = self.records.load_all()?;

        let id = self.ids.next();
        let record = AppRecord::new(fields, &id.to_string(), now_millis().max(id));
        apps.insert(0, record.clone());
        self.records.save_all(&apps)?;

        tracing::info!(app_id = %id, "app created");
        Ok(record)
    }

    /// Shallow-merge caller fields over an existing record.
    ///
    /// `id` always stays the path id and `updateTime` is refreshed, whatever
    /// the caller sent.
    pub fn update_app(&self, id: &str, fields: AppFields) -> CatalogResult<AppRecord> {
        let _guard = self.lock();
        let mut apps = self.records.load_all()?;

        let record = apps
            .iter_mut()
            .find(|app| app.id() == Some(id))
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        record.merge(fields, id, now_millis());
        let updated = record.clone();
        self.records.save_all(&apps)?;

        tracing::info!(app_id = %id, "app updated");
        Ok(updated)
    }

    /// Remove a record and, best-effort, the blob its `downloadUrl` points at.
    ///
    /// Succeeds when the id is unknown. Blob deletion failures are logged and
    /// never stop the record from being removed.
    pub fn delete_app(&self, id: &str) -> CatalogResult<()> {
        let _guard = self.lock();
        let mut apps = self.records.load_all()?;

        let blob = apps
            .iter()
            .find(|app| app.id() == Some(id))
            .and_then(AppRecord::download_url)
            .filter(|url| BlobStore::owns(url))
            .map(str::to_string);
        if let Some(url) = blob {
            if let Err(e) = self.blobs.delete(&url) {
                tracing::warn!(app_id = %id, download_url = %url, error = %e, "failed to delete app blob");
            }
        }

        let before = apps.len();
        apps.retain(|app| app.id() != Some(id));
        self.records.save_all(&apps)?;

        if apps.len() != before {
            tracing::info!(app_id = %id, "app deleted");
        }
        Ok(())
    }

    /// Whether the catalog file can be parsed right now.
    pub fn check_readable(&self) -> CatalogResult<()> {
        self.list_apps().map(|_| ())
    }

    /// Whether both the catalog and the uploads can be written right now.
    pub fn check_writable(&self) -> CatalogResult<()> {
        self.records.check_writable()?;
        self.blobs.check_writable()?;
        Ok(())
    }

    /// Describe a freshly stored upload. The catalog itself is not touched;
    /// registering the file is a separate `create_app` call by the client.
    pub fn record_upload(&self, stored: &StoredBlob, original_name: &str) -> UploadResult {
        UploadResult {
            url: stored.relative_path.clone(),
            size: stored.size,
            original_name: decode_transport_name(original_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, CatalogService) {
        let temp = TempDir::new().unwrap();
        let catalog = CatalogService::new(
            RecordStore::new(temp.path().join("db.json")),
            BlobStore::new(temp.path().join("uploads"), temp.path().join("staging")),
        );
        (temp, catalog)
    }

    fn fields(value: Value) -> AppFields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn create_puts_new_record_first() {
        let (_temp, catalog) = setup();
        let before = now_millis();

        let first = catalog.create_app(fields(json!({"name": "Foo", "version": "1.0"}))).unwrap();
        let second = catalog.create_app(fields(json!({"name": "Bar"}))).unwrap();

        let apps = catalog.list_apps().unwrap();
        assert_eq!(apps, vec![second.clone(), first.clone()]);

        let id = first.id().unwrap();
        assert!(!id.is_empty() && id.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(first.id(), second.id());
        assert!(first.update_time().unwrap() >= before);
        assert_eq!(first.get("name"), Some(&json!("Foo")));
    }

    #[test]
    fn create_ignores_client_supplied_id() {
        let (_temp, catalog) = setup();
        let record = catalog.create_app(fields(json!({"id": "mine", "updateTime": 0}))).unwrap();
        assert_ne!(record.id(), Some("mine"));
        assert!(record.update_time().unwrap() > 0);
    }

    #[test]
    fn concurrent_creates_lose_no_records() {
        let (_temp, catalog) = setup();

        std::thread::scope(|scope| {
            for i in 0..16 {
                let catalog = &catalog;
                scope.spawn(move || {
                    catalog.create_app(fields(json!({"n": i}))).unwrap();
                });
            }
        });

        let apps = catalog.list_apps().unwrap();
        assert_eq!(apps.len(), 16);
        let mut seen: Vec<i64> = apps
            .iter()
            .map(|app| app.get("n").and_then(Value::as_i64).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn concurrent_updates_of_different_apps_all_land() {
        let (_temp, catalog) = setup();
        let ids: Vec<String> = (0..8)
            .map(|_| catalog.create_app(AppFields::new()).unwrap().id().unwrap().to_string())
            .collect();

        std::thread::scope(|scope| {
            for id in &ids {
                let catalog = &catalog;
                scope.spawn(move || {
                    catalog.update_app(id, fields(json!({"touched": true}))).unwrap();
                });
            }
        });

        let apps = catalog.list_apps().unwrap();
        assert_eq!(apps.len(), 8);
        assert!(apps.iter().all(|app| app.get("touched") == Some(&json!(true))));
    }

    #[test]
    fn rapid_creates_get_unique_ids() {
        let (_temp, catalog) = setup();
        let ids: Vec<String> = (0..20)
            .map(|i| {
                let record = catalog.create_app(fields(json!({"n": i}))).unwrap();
                record.id().unwrap().to_string()
            })
            .collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn update_merges_and_keeps_id() {
        let (_temp, catalog) = setup();
        let created = catalog
            .create_app(fields(json!({"name": "Foo", "version": "1.0", "size": 10})))
            .unwrap();
        let id = created.id().unwrap().to_string();

        let updated = catalog
            .update_app(&id, fields(json!({"name": "x", "id": "other"})))
            .unwrap();

        assert_eq!(updated.id(), Some(id.as_str()));
        assert_eq!(updated.get("name"), Some(&json!("x")));
        assert_eq!(updated.get("version"), Some(&json!("1.0")));
        assert_eq!(updated.get("size"), Some(&json!(10)));
        assert!(updated.update_time() >= created.update_time());
        assert_eq!(catalog.list_apps().unwrap(), vec![updated]);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let (_temp, catalog) = setup();
        catalog.create_app(fields(json!({"name": "Foo"}))).unwrap();

        let err = catalog.update_app("missing", AppFields::new()).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref id) if id == "missing"));
    }

    #[test]
    fn delete_is_idempotent() {
        let (_temp, catalog) = setup();
        let keep = catalog.create_app(fields(json!({"name": "Keep"}))).unwrap();
        let gone = catalog.create_app(fields(json!({"name": "Gone"}))).unwrap();
        let id = gone.id().unwrap().to_string();

        catalog.delete_app(&id).unwrap();
        assert_eq!(catalog.list_apps().unwrap(), vec![keep]);

        catalog.delete_app(&id).unwrap();
        catalog.delete_app("never-existed").unwrap();
    }

    #[test]
    fn delete_cascades_to_uploaded_blob() {
        let (_temp, catalog) = setup();
        let blob = catalog.blobs().save("app.apk", &b"apk"[..]).unwrap();
        let path = catalog.blobs().dir().join(&blob.filename);
        let record = catalog
            .create_app(fields(json!({"name": "Foo", "downloadUrl": blob.relative_path})))
            .unwrap();

        catalog.delete_app(record.id().unwrap()).unwrap();

        assert!(!path.exists());
        assert!(catalog.list_apps().unwrap().is_empty());
    }

    #[test]
    fn delete_leaves_external_urls_alone() {
        let (temp, catalog) = setup();
        let outside = temp.path().join("keep.apk");
        fs::write(&outside, b"x").unwrap();
        let record = catalog
            .create_app(fields(json!({"downloadUrl": "https://cdn.example.com/keep.apk"})))
            .unwrap();

        catalog.delete_app(record.id().unwrap()).unwrap();
        assert!(outside.exists());
    }

    #[test]
    fn blob_delete_failure_does_not_block_record_delete() {
        let (temp, catalog) = setup();
        let victim = temp.path().join("db-backup.json");
        fs::write(&victim, b"{}").unwrap();
        let record = catalog
            .create_app(fields(json!({"downloadUrl": "/uploads/../db-backup.json"})))
            .unwrap();
        let missing = catalog
            .create_app(fields(json!({"downloadUrl": "/uploads/never-written.apk"})))
            .unwrap();

        catalog.delete_app(record.id().unwrap()).unwrap();
        catalog.delete_app(missing.id().unwrap()).unwrap();

        assert!(victim.exists());
        assert!(catalog.list_apps().unwrap().is_empty());
    }

    #[test]
    fn corrupt_catalog_surfaces_storage_error() {
        let (_temp, catalog) = setup();
        fs::write(catalog.records().path(), "[{").unwrap();

        assert!(matches!(
            catalog.list_apps(),
            Err(CatalogError::Storage(StorageError::Corrupt { .. }))
        ));
        assert!(matches!(
            catalog.create_app(AppFields::new()),
            Err(CatalogError::Storage(_))
        ));
    }

    #[test]
    fn record_upload_does_not_touch_catalog() {
        let (_temp, catalog) = setup();
        let mangled: String = "应用.apk".bytes().map(char::from).collect();
        let blob = catalog.blobs().save(&mangled, &b"12345"[..]).unwrap();

        let result = catalog.record_upload(&blob, &mangled);

        assert_eq!(result.url, blob.relative_path);
        assert_eq!(result.size, 5);
        assert_eq!(result.original_name, "应用.apk");
        assert!(catalog.list_apps().unwrap().is_empty());
    }
}
