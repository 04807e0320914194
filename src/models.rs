// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the catalog record type and the request and response
//! structures used by the REST API.
//!
//! ## App Records
//!
//! An [`AppRecord`] is a free-form JSON object. Only three keys are
//! interpreted by the server:
//!
//! - `id` - server-assigned decimal millisecond string, never changed by updates
//! - `updateTime` - milliseconds since the epoch, refreshed on every write
//! - `downloadUrl` - optional path into blob storage (`/uploads/...`)
//!
//! Everything else is stored and returned verbatim, in the order supplied.
//!
//! ## Envelopes
//!
//! Successful responses are wrapped as `{"code": 0, "data": ...}`; failures
//! use `{"code": <status>, "message": ...}` (see [`crate::error::ApiError`]).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Caller-supplied fields for a create or update.
pub type AppFields = Map<String, Value>;

// =============================================================================
// App Record
// =============================================================================

/// One catalog entry describing a distributable application version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct AppRecord(AppFields);

impl AppRecord {
    pub const ID: &'static str = "id";
    pub const UPDATE_TIME: &'static str = "updateTime";
    pub const DOWNLOAD_URL: &'static str = "downloadUrl";

    /// Build a new record: caller fields first, then the server-assigned ones.
    pub fn new(fields: AppFields, id: &str, update_time: i64) -> Self {
        let mut record = Self(fields);
        record.stamp(id, update_time);
        record
    }

    /// Record identifier, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get(Self::ID).and_then(Value::as_str)
    }

    /// Blob path, if present and a string.
    pub fn download_url(&self) -> Option<&str> {
        self.0.get(Self::DOWNLOAD_URL).and_then(Value::as_str)
    }

    pub fn update_time(&self) -> Option<i64> {
        self.0.get(Self::UPDATE_TIME).and_then(Value::as_i64)
    }

    /// Look up an arbitrary field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &AppFields {
        &self.0
    }

    /// Shallow merge: top-level keys from `fields` replace existing ones,
    /// nested values are not merged. The reserved fields are then forced back.
    pub fn merge(&mut self, fields: AppFields, id: &str, update_time: i64) {
        self.0.extend(fields);
        self.stamp(id, update_time);
    }

    fn stamp(&mut self, id: &str, update_time: i64) {
        self.0.insert(Self::ID.to_string(), Value::from(id));
        self.0
            .insert(Self::UPDATE_TIME.to_string(), Value::from(update_time));
    }
}

// =============================================================================
// Auth Models
// =============================================================================

/// Login request body.
///
/// Missing fields deserialize as empty strings so they are rejected as bad
/// credentials rather than as a malformed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Issued session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Upload Models
// =============================================================================

/// Result of storing an uploaded binary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Servable path of the stored file (`/uploads/<filename>`).
    pub url: String,
    /// Stored size in bytes.
    pub size: u64,
    /// Client-side filename, decoded to proper UTF-8.
    pub original_name: String,
}

/// Multipart form accepted by the upload endpoint (documentation only).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

// =============================================================================
// Response Envelopes
// =============================================================================

/// Success envelope carrying a payload.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { code: 0, data }
    }
}

/// Success envelope carrying only a message.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub code: i32,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: 0,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> AppFields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn new_record_keeps_caller_fields_and_stamps_reserved_ones() {
        let record = AppRecord::new(
            fields(json!({"name": "Foo", "version": "1.0"})),
            "1700000000000",
            1_700_000_000_000,
        );

        assert_eq!(record.id(), Some("1700000000000"));
        assert_eq!(record.update_time(), Some(1_700_000_000_000));
        assert_eq!(record.get("name"), Some(&json!("Foo")));
        let keys: Vec<&String> = record.fields().keys().collect();
        assert_eq!(keys, ["name", "version", "id", "updateTime"]);
    }

    #[test]
    fn server_fields_win_over_caller_fields() {
        let record = AppRecord::new(fields(json!({"id": "spoofed", "updateTime": 1})), "42", 99);
        assert_eq!(record.id(), Some("42"));
        assert_eq!(record.update_time(), Some(99));
    }

    #[test]
    fn merge_is_shallow() {
        let mut record = AppRecord::new(
            fields(json!({"name": "Foo", "meta": {"a": 1, "b": 2}})),
            "1",
            10,
        );
        record.merge(fields(json!({"meta": {"a": 3}, "id": "2"})), "1", 20);

        assert_eq!(record.get("meta"), Some(&json!({"a": 3})));
        assert_eq!(record.get("name"), Some(&json!("Foo")));
        assert_eq!(record.id(), Some("1"));
        assert_eq!(record.update_time(), Some(20));
    }

    #[test]
    fn record_serializes_as_plain_object() {
        let record = AppRecord::new(fields(json!({"downloadUrl": "/uploads/x.apk"})), "7", 7);
        assert_eq!(record.download_url(), Some("/uploads/x.apk"));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"downloadUrl": "/uploads/x.apk", "id": "7", "updateTime": 7})
        );
    }

    #[test]
    fn upload_result_uses_camel_case() {
        let result = UploadResult {
            url: "/uploads/1-a.apk".into(),
            size: 3,
            original_name: "a.apk".into(),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"url": "/uploads/1-a.apk", "size": 3, "originalName": "a.apk"})
        );
    }

    #[test]
    fn login_request_tolerates_missing_fields() {
        let request: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(request.username.is_empty());
        assert!(request.password.is_empty());
    }
}
