// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    models::{AppRecord, LoginRequest, LoginResponse, MessageResponse, UploadForm, UploadResult},
    state::AppState,
};

pub mod apps;
pub mod auth;
pub mod health;
pub mod upload;

/// Build the full HTTP surface: JSON API, uploaded files, admin UI, docs.
pub fn router(state: AppState, config: &Config) -> Router {
    let uploads_dir = state.catalog.blobs().dir().to_path_buf();

    let api_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/apps", get(apps::list_apps).post(apps::create_app))
        .route("/apps/{id}", put(apps::update_app).delete(apps::delete_app))
        .route(
            "/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::max(config.upload_limit)),
        )
        .layer(DefaultBodyLimit::max(config.json_body_limit));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        apps::list_apps,
        apps::create_app,
        apps::update_app,
        apps::delete_app,
        upload::upload_file,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            AppRecord,
            LoginRequest,
            LoginResponse,
            UploadResult,
            UploadForm,
            MessageResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Admin login"),
        (name = "Apps", description = "App catalog management"),
        (name = "Upload", description = "APK uploads"),
        (name = "Health", description = "Liveness and readiness")
    )
)]
struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected routes.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
