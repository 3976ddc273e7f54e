// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! JSON HTTP API
//!
//! All resources live under `/api/v2`; `/health` sits at the root.

mod error;
pub mod products;
pub mod releases;
pub mod version_ranges;
pub mod versions;

pub use error::{ApiError, ErrorResponse, VersionNotFound};

use crate::config::Config;
use crate::data::VersionManagementData;
use anyhow::{Context, Result};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared handler state
pub type AppState = Arc<VersionManagementData>;

/// Health check body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy"
    pub status: String,
    /// Crate version
    pub version: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Build the application router
pub fn router(data: VersionManagementData) -> Router {
    let api = Router::new()
        .route(
            "/versions",
            get(versions::get_version).post(versions::create_version),
        )
        .route("/versions/commit", get(versions::versions_for_commit))
        .route(
            "/versions/semantic",
            get(versions::versions_for_semantic_version),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/{id}/releases", get(products::product_releases))
        .route(
            "/releases",
            get(releases::list_releases).post(releases::create_release),
        )
        .route(
            "/releases/{id}",
            get(releases::get_release)
                .put(releases::update_release)
                .delete(releases::delete_release),
        )
        .route(
            "/version-ranges",
            get(version_ranges::list_version_ranges).post(version_ranges::create_version_range),
        )
        .route(
            "/version-ranges/{id}",
            get(version_ranges::get_version_range)
                .put(version_ranges::update_version_range)
                .delete(version_ranges::delete_version_range),
        )
        .route(
            "/version-ranges/{id}/releases",
            get(version_ranges::version_range_releases),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v2", api)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(data))
}

/// Serve the API on the configured address until Ctrl-C
pub async fn serve(config: &Config, data: VersionManagementData) -> Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "Version management API listening");

    axum::serve(listener, router(data))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!(error = %e, "Cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
