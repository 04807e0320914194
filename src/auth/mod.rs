// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session-token login for the admin API.
//!
//! ## Auth Flow
//!
//! 1. Admin UI posts `{username, password}` to `/api/login`
//! 2. On a match with the configured admin account the server returns a
//!    random hex token and remembers it in memory
//! 3. Protected routes require `Authorization: Bearer <token>`
//!
//! ## Security
//!
//! - One shared admin account, compared in plain text
//! - No expiry, no logout; restarting the process drops every session

pub mod error;
pub mod extractor;
pub mod session;

pub use error::AuthError;
pub use extractor::Auth;
pub use session::{AdminCredentials, SessionAuthority};
