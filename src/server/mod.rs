//! Local viewer server.
//!
//! Serves the interactive viewer page, the raw primary log and a small JSON
//! API over the primary snapshot. The snapshot is normalized once at startup
//! and shared read-only between handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/viewer.html` (configurable) | Interactive viewer page |
//! | `GET`  | `/build_log.json` | Raw primary log, verbatim |
//! | `GET`  | `/api/summary` | Asset, bundle, file and GUID counts |
//! | `GET`  | `/api/assets?q=&sort=&dir=` | Asset table rows |
//! | `GET`  | `/api/assets/bundles?path=` | Bundle map (with GUIDs) of one asset |
//! | `GET`  | `/api/assets/lookup?path=` | Bundles whose files name one asset |
//! | `GET`  | `/api/bundles/{hash}` | One bundle's content |
//! | `POST` | `/api/compare` | Diff an uploaded log (previous) against the primary (current) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "not_found", "message": "bundle not found: 3f2a" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).
//!
//! Uploaded comparison logs share the size cap of logs read from disk,
//! [`MAX_LOG_FILE_SIZE`]; larger bodies get axum's `413`.

mod api;
mod page;

use crate::config::ServeConfig;
use crate::model::Snapshot;
use crate::parsers::MAX_LOG_FILE_SIZE;
use crate::pipeline::ParsedLog;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Path the raw primary log is served at.
pub const RAW_LOG_PATH: &str = "/build_log.json";

/// Shared state passed to every handler through axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Normalized primary snapshot
    pub snapshot: Arc<Snapshot>,
    /// Primary log file content, served verbatim
    pub raw_log: Arc<str>,
    /// Where the primary log was read from
    pub log_path: Arc<PathBuf>,
}

impl AppState {
    /// Build the shared state from a loaded primary log.
    pub fn new(parsed: ParsedLog, log_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: Arc::new(parsed.snapshot),
            raw_log: Arc::from(parsed.raw_content),
            log_path: Arc::new(log_path.into()),
        }
    }
}

/// Build the router with every route registered.
///
/// `page_path` must start with `/` and must not collide with the API or the
/// raw log path; [`crate::config::Validatable`] enforces both.
pub fn build_router(state: AppState, page_path: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(page_path, get(page::handle_page))
        .route(RAW_LOG_PATH, get(api::handle_raw_log))
        .route("/api/summary", get(api::handle_summary))
        .route("/api/assets", get(api::handle_assets))
        .route("/api/assets/bundles", get(api::handle_asset_bundles))
        .route("/api/assets/lookup", get(api::handle_asset_lookup))
        .route("/api/bundles/{hash}", get(api::handle_bundle))
        .route("/api/compare", post(api::handle_compare))
        .layer(DefaultBodyLimit::max(upload_limit()))
        .layer(cors)
        .with_state(state)
}

/// Largest accepted `/api/compare` body, in bytes.
fn upload_limit() -> usize {
    usize::try_from(MAX_LOG_FILE_SIZE).unwrap_or(usize::MAX)
}

/// Bind and serve until the process is terminated.
pub async fn run_server(config: &ServeConfig, parsed: ParsedLog) -> anyhow::Result<()> {
    let state = AppState::new(parsed, config.server.log_file.clone());
    let app = build_router(state, &config.server.page_path);

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        "Viewer available at http://{}{}",
        address,
        config.server.page_path
    );

    axum::serve(listener, app).await?;
    Ok(())
}
