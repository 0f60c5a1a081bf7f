mod errors;
mod handlers;
mod middleware;
mod upload;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::engine::ReportPipeline;

pub use errors::{ApiError, FieldError};

mod urls {
    pub const HEALTH: &str = "/health";
    pub const REPORT: &str = "/report";
}

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<ReportPipeline>,
    upload_dir: PathBuf,
    debug_errors: bool
}

impl AppState {
    pub fn new(pipeline: ReportPipeline, upload_dir: impl Into<PathBuf>, debug_errors: bool) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            upload_dir: upload_dir.into(),
            debug_errors
        }
    }
}

/// Builds the service routes. Anything not routed is looked up in `public_dir`. Cross-origin
/// requests are allowed from anywhere.
pub fn router(state: AppState, public_dir: &Path, max_upload_bytes: usize) -> Router {
    let static_files = ServeDir::new(public_dir)
        .not_found_service(handlers::not_found.into_service());

    Router::new()
        .route(urls::HEALTH, get(handlers::health))
        .route(urls::REPORT, post(handlers::report))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(axum::middleware::from_fn(middleware::request_context))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await
        .with_context(|| format!("unable to create upload dir {}", config.upload_dir.display()))?;

    let listener = TcpListener::bind(config.address()?).await
        .context("unable to bind listener")?;

    info!("starting web server on address={}...", listener.local_addr()?);

    let app = router(state, &config.public_dir, config.max_upload_bytes);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("unable to serve requests")?;

    info!("web server has been closed...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {error}");
        std::future::pending::<()>().await;
    }

    info!("shutdown signal received");
}
