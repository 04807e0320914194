// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use apk_depot::{
    api::router,
    auth::{AdminCredentials, SessionAuthority},
    catalog::CatalogService,
    config::{Config, DEFAULT_LOG_FILTER},
    state::AppState,
    storage::{BlobStore, RecordStore, StoragePaths},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let paths = StoragePaths::new(&config.data_dir);
    std::fs::create_dir_all(paths.root())
        .with_context(|| format!("creating data directory {}", paths.root().display()))?;

    let catalog = CatalogService::new(
        RecordStore::new(paths.catalog_file()),
        BlobStore::new(paths.uploads_dir(), paths.staging_dir()),
    );
    // fail fast on a corrupt catalog instead of on the first request
    let apps = catalog
        .list_apps()
        .context("loading app catalog")?;
    info!(
        data_dir = %paths.root().display(),
        apps = apps.len(),
        "catalog loaded"
    );

    let sessions = SessionAuthority::new(AdminCredentials::new(
        config.admin_username.clone(),
        config.admin_password.clone(),
    ));
    let state = AppState::new(catalog, sessions);
    let app = router(state, &config);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("parsing bind address {}", config.bind_address()))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, "APK Depot listening (admin UI at /, docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("APK Depot stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// Resolves on SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}
