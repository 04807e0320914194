// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{ApiResponse, AppFields, AppRecord, MessageResponse},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/apps",
    tag = "Apps",
    responses((status = 200, description = "Catalog, newest first, wrapped as {code: 0, data}", body = [AppRecord]))
)]
pub async fn list_apps(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AppRecord>>>, ApiError> {
    let apps = state.catalog.list_apps()?;
    Ok(Json(ApiResponse::ok(apps)))
}

#[utoipa::path(
    post,
    path = "/api/apps",
    request_body = AppRecord,
    tag = "Apps",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Created record, wrapped as {code: 0, data}", body = AppRecord),
        (status = 400, description = "Body is not a JSON object"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_app(
    _auth: Auth,
    State(state): State<AppState>,
    payload: Result<Json<AppFields>, JsonRejection>,
) -> Result<Json<ApiResponse<AppRecord>>, ApiError> {
    let Json(fields) = payload?;
    let app = state.catalog.create_app(fields)?;
    Ok(Json(ApiResponse::ok(app)))
}

#[utoipa::path(
    put,
    path = "/api/apps/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the app to update")
    ),
    request_body = AppRecord,
    tag = "Apps",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Merged record, wrapped as {code: 0, data}", body = AppRecord),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "App not found")
    )
)]
pub async fn update_app(
    _auth: Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
    payload: Result<Json<AppFields>, JsonRejection>,
) -> Result<Json<ApiResponse<AppRecord>>, ApiError> {
    let Json(fields) = payload?;
    let app = state.catalog.update_app(&id, fields)?;
    Ok(Json(ApiResponse::ok(app)))
}

#[utoipa::path(
    delete,
    path = "/api/apps/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the app to delete")
    ),
    tag = "Apps",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted (also when the id was unknown)", body = MessageResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn delete_app(
    _auth: Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.catalog.delete_app(&id)?;
    Ok(Json(MessageResponse::ok("Deleted")))
}
