// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! APK Depot - Android package distribution backend
//!
//! Accepts APK uploads, keeps a catalog of app entries in a JSON file and
//! serves the catalog plus download links, behind a single admin login.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session-token login and the `Auth` extractor
//! - `catalog` - App entry lifecycle over the record and blob stores
//! - `storage` - JSON record store and uploaded-file blob store

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod state;
pub mod storage;
