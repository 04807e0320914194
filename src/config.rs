// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, defaults, and the [`Config`] loaded from
//! them at startup. Every setting has a default so the server runs with no
//! environment at all.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `DATA_DIR` | Directory holding `db.json` and `uploads/` | `.` |
//! | `PUBLIC_DIR` | Static admin UI served at `/` | `public` |
//! | `ADMIN_USERNAME` | Admin login name | `admin` |
//! | `ADMIN_PASSWORD` | Admin login password | `123456` |
//! | `JSON_BODY_LIMIT_BYTES` | Max JSON request body | 50 MiB |
//! | `UPLOAD_LIMIT_BYTES` | Max upload request body | 1 GiB |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::path::PathBuf;
use std::str::FromStr;

use crate::storage::paths::DATA_ROOT;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const PUBLIC_DIR_ENV: &str = "PUBLIC_DIR";
pub const ADMIN_USERNAME_ENV: &str = "ADMIN_USERNAME";
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
pub const JSON_BODY_LIMIT_ENV: &str = "JSON_BODY_LIMIT_BYTES";
pub const UPLOAD_LIMIT_ENV: &str = "UPLOAD_LIMIT_BYTES";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "123456";
const DEFAULT_JSON_BODY_LIMIT: usize = 50 * 1024 * 1024;
const DEFAULT_UPLOAD_LIMIT: usize = 1024 * 1024 * 1024;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    pub json_body_limit: usize,
    pub upload_limit: usize,
    /// Emit newline-delimited JSON logs instead of human-readable ones.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DATA_ROOT),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            json_body_limit: DEFAULT_JSON_BODY_LIMIT,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
            log_json: false,
        }
    }
}

impl Config {
    /// Build [`Config`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup(HOST_ENV).unwrap_or(defaults.host),
            port: parse_var(&lookup, PORT_ENV).unwrap_or(defaults.port),
            data_dir: lookup(DATA_DIR_ENV).map(PathBuf::from).unwrap_or(defaults.data_dir),
            public_dir: lookup(PUBLIC_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            admin_username: lookup(ADMIN_USERNAME_ENV).unwrap_or(defaults.admin_username),
            admin_password: lookup(ADMIN_PASSWORD_ENV).unwrap_or(defaults.admin_password),
            json_body_limit: parse_var(&lookup, JSON_BODY_LIMIT_ENV).unwrap_or(defaults.json_body_limit),
            upload_limit: parse_var(&lookup, UPLOAD_LIMIT_ENV).unwrap_or(defaults.upload_limit),
            log_json: lookup(LOG_FORMAT_ENV)
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.log_json),
        }
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
