// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated requests.
//!
//! Use the `Auth` extractor in handlers to require a session:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(token): Auth) -> impl IntoResponse {
//!     // token is the validated session token
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::AuthError;
use crate::state::AppState;

/// Extractor for requests carrying a valid `Authorization: Bearer <token>`.
///
/// A missing header is rejected with [`AuthError::MissingToken`]; any other
/// shape, or a token the session authority never issued, with
/// [`AuthError::InvalidToken`].
#[derive(Debug, Clone)]
pub struct Auth(pub String);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::InvalidToken)?;

        if !state.sessions.validate(token) {
            tracing::debug!("rejected unknown session token");
            return Err(AuthError::InvalidToken);
        }

        Ok(Auth(token.to_string()))
    }
}
