// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    error::ApiError,
    models::{ApiResponse, LoginRequest, LoginResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Session token, wrapped as {code: 0, data}", body = LoginResponse),
        (status = 401, description = "Wrong username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let Json(request) = payload?;

    match state.sessions.login(&request.username, &request.password) {
        Ok(token) => {
            tracing::info!(username = %request.username, "admin logged in");
            Ok(Json(ApiResponse::ok(LoginResponse { token })))
        }
        Err(e) => {
            tracing::warn!(username = %request.username, "login rejected");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::test_state;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn login_success_returns_usable_token() {
        let (_temp, state) = test_state();
        let request = LoginRequest {
            username: "admin".into(),
            password: "123456".into(),
        };

        let Json(response) = login(State(state.clone()), Ok(Json(request)))
            .await
            .expect("login succeeds");

        assert_eq!(response.code, 0);
        assert!(state.sessions.validate(&response.data.token));
    }

    #[tokio::test]
    async fn login_failure_is_unauthorized() {
        let (_temp, state) = test_state();
        let request = LoginRequest {
            username: "admin".into(),
            password: "guess".into(),
        };

        let err = login(State(state.clone()), Ok(Json(request)))
            .await
            .expect_err("login fails");

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(state.sessions.active_sessions(), 0);
    }
}
