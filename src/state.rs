// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::SessionAuthority;
use crate::catalog::CatalogService;

/// Shared handler context: the catalog and the session authority are
/// created once at startup and injected into every request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub sessions: Arc<SessionAuthority>,
}

impl AppState {
    pub fn new(catalog: CatalogService, sessions: SessionAuthority) -> Self {
        Self {
            catalog: Arc::new(catalog),
            sessions: Arc::new(sessions),
        }
    }
}
