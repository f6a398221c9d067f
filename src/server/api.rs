//! JSON API handlers and the error response type.

use super::AppState;
use crate::diff::{diff, ChangeReport};
use crate::model::{AssetBundles, AssetRow, AssetSortKey, Bundle, DependencyIndex, SortDirection};
use crate::parsers::normalize_with_diagnostics;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Error type that converts into a JSON error response.
#[derive(Debug)]
pub(super) struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

// ============ Raw log ============

pub(super) async fn handle_raw_log(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.raw_log.to_string(),
    )
}

// ============ Summary ============

#[derive(Debug, Serialize)]
pub(super) struct SummaryResponse {
    log_file: String,
    assets: usize,
    bundles: usize,
    files: usize,
    guids: usize,
}

pub(super) async fn handle_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let index = DependencyIndex::build(&state.snapshot);
    Json(SummaryResponse {
        log_file: state.log_path.display().to_string(),
        assets: state.snapshot.asset_count(),
        bundles: state.snapshot.bundle_count(),
        files: index.file_count(),
        guids: index.total_guid_count(),
    })
}

// ============ Assets ============

#[derive(Debug, Default, Deserialize)]
pub(super) struct AssetsQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    sort: AssetSortKey,
    #[serde(default)]
    dir: SortDirection,
}

#[derive(Debug, Serialize)]
pub(super) struct AssetsResponse<'a> {
    total: usize,
    rows: Vec<AssetRow<'a>>,
}

pub(super) async fn handle_assets(
    State(state): State<AppState>,
    Query(query): Query<AssetsQuery>,
) -> Response {
    let index = DependencyIndex::build(&state.snapshot);
    let search = query.q.as_deref().filter(|q| !q.trim().is_empty());
    let rows = index.asset_rows(search, query.sort, query.dir);
    Json(AssetsResponse {
        total: state.snapshot.asset_count(),
        rows,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
pub(super) struct AssetQuery {
    path: String,
}

#[derive(Debug, Serialize)]
pub(super) struct AssetBundlesResponse<'a> {
    path: &'a str,
    bundle_count: usize,
    bundles: Option<&'a AssetBundles>,
}

/// Bundle map of one asset. An unknown path yields a count of 0 and no map.
pub(super) async fn handle_asset_bundles(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> Response {
    let index = DependencyIndex::build(&state.snapshot);
    Json(AssetBundlesResponse {
        path: &query.path,
        bundle_count: index.bundle_count_for_asset(&query.path),
        bundles: state.snapshot.assets().get(query.path.as_str()),
    })
    .into_response()
}

#[derive(Debug, Serialize)]
pub(super) struct AssetLookupResponse<'a> {
    path: &'a str,
    bundles: &'a [&'a str],
}

/// Bundles whose file entries name the asset.
pub(super) async fn handle_asset_lookup(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
) -> Response {
    let index = DependencyIndex::build(&state.snapshot);
    Json(AssetLookupResponse {
        path: &query.path,
        bundles: index.bundles_referencing_asset(&query.path),
    })
    .into_response()
}

// ============ Bundles ============

#[derive(Debug, Serialize)]
pub(super) struct BundleResponse<'a> {
    hash: &'a str,
    #[serde(flatten)]
    bundle: &'a Bundle,
}

pub(super) async fn handle_bundle(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Response, AppError> {
    let bundle = state
        .snapshot
        .bundles()
        .get(hash.as_str())
        .ok_or_else(|| not_found(format!("bundle not found: {hash}")))?;
    Ok(Json(BundleResponse {
        hash: &hash,
        bundle,
    })
    .into_response())
}

// ============ Compare ============

/// Diff an uploaded log against the primary.
///
/// The upload is the previous snapshot and the primary is the current one.
/// An upload that is not JSON is rejected before any diff runs.
pub(super) async fn handle_compare(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChangeReport>, AppError> {
    let raw: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| bad_request(format!("comparison log is not valid JSON: {e}")))?;

    let (previous, diagnostics) = normalize_with_diagnostics(&raw);
    diagnostics.log_summary();

    let report = diff(&state.snapshot, &previous);
    tracing::info!(
        "Compared against uploaded log ({} assets, {} bundles): {} changes",
        previous.asset_count(),
        previous.bundle_count(),
        report.total_changes()
    );
    Ok(Json(report))
}
