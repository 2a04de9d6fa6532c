// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTPS listener serving the admission webhook

use crate::config::{AutoconfConfig, ServerConfig};
use crate::constants::paths;
use crate::error::Result;
use crate::webhook::handler;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_server::tls_rustls::RustlsConfig;
use kube::core::admission::AdmissionReview;
use kube::core::DynamicObject;
use std::sync::Arc;
use tracing::info;

/// Routes of the webhook: the admission endpoint and a health check
pub fn router(config: Arc<AutoconfConfig>) -> Router {
    Router::new()
        .route(paths::AUTOCONF, post(autoconf))
        .route(paths::HEALTHZ, get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(paths::MAX_BODY_BYTES))
        .with_state(config)
}

async fn autoconf(
    State(config): State<Arc<AutoconfConfig>>,
    body: Bytes,
) -> Json<AdmissionReview<DynamicObject>> {
    Json(handler::review(&config, &body, &mut rand::thread_rng()))
}

/// Serve the webhook over TLS until the listener fails
pub async fn serve(config: AutoconfConfig, server: ServerConfig) -> Result<()> {
    let tls = RustlsConfig::from_pem_file(&server.tls_cert_file, &server.tls_key_file).await?;
    info!(
        "Loaded TLS certificate {} and key {}",
        server.tls_cert_file.display(),
        server.tls_key_file.display()
    );

    info!("Webhook listening on {}", server.listen_address);
    axum_server::bind_rustls(server.listen_address, tls)
        .serve(router(Arc::new(config)).into_make_service())
        .await?;

    Ok(())
}
