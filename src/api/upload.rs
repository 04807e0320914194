// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! APK upload endpoint.
//!
//! Accepts `multipart/form-data` with a `file` field and streams it chunk by
//! chunk into the blob store. Other fields are ignored. Uploading does not
//! register a catalog entry; the admin UI follows up with `POST /api/apps`
//! carrying the returned `url` as `downloadUrl`.

use axum::extract::{
    multipart::{MultipartError, MultipartRejection},
    Multipart, State,
};
use axum::Json;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{ApiResponse, UploadResult},
    state::AppState,
};

/// Multipart field carrying the binary.
const FILE_FIELD: &str = "file";

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::new(err.status(), err.body_text())
}

#[utoipa::path(
    post,
    path = "/api/upload",
    request_body(content = crate::models::UploadForm, content_type = "multipart/form-data", description = "APK file in the `file` field"),
    tag = "Upload",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Stored file, wrapped as {code: 0, data}", body = UploadResult),
        (status = 400, description = "No file uploaded"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn upload_file(
    _auth: Auth,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<UploadResult>>, ApiError> {
    let Ok(mut multipart) = multipart else {
        tracing::debug!("upload request is not multipart");
        return Err(ApiError::bad_request("No file uploaded"));
    };

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // a `file` part without a filename is a plain text field
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let mut writer = state.catalog.blobs().begin(&original_name)?;
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            writer.write_chunk(&chunk)?;
        }
        let stored = writer.finish()?;

        tracing::info!(path = %stored.relative_path, size = stored.size, "upload stored");
        let result = state.catalog.record_upload(&stored, &original_name);
        return Ok(Json(ApiResponse::ok(result)));
    }

    tracing::debug!("upload request had no file field");
    Err(ApiError::bad_request("No file uploaded"))
}
