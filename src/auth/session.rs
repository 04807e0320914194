// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory session authority.
//!
//! A single admin credential pair is checked on login; a successful login
//! mints a random 128-bit token kept in a process-local set. Tokens never
//! expire and are lost on restart.

use std::collections::HashSet;
use std::sync::RwLock;

use ring::rand::{SecureRandom, SystemRandom};

use super::AuthError;

/// Token entropy in bytes (hex-encoded to 32 characters).
const TOKEN_BYTES: usize = 16;

/// The one account allowed to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Issues and validates bearer tokens.
pub struct SessionAuthority {
    credentials: AdminCredentials,
    sessions: RwLock<HashSet<String>>,
    rng: SystemRandom,
}

impl SessionAuthority {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials,
            sessions: RwLock::new(HashSet::new()),
            rng: SystemRandom::new(),
        }
    }

    /// Check the credentials and mint a new session token.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        if !self.credentials.matches(username, password) {
            return Err(AuthError::InvalidCredentials);
        }

        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| AuthError::Internal("system random source unavailable".into()))?;
        let token = hex::encode(bytes);

        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(token.clone());
        Ok(token)
    }

    /// Whether `token` was issued by this authority.
    pub fn validate(&self, token: &str) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(token)
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
