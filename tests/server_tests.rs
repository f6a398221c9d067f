//! Viewer server tests.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! socket is bound.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use bundle_log_tools::pipeline::load_log;
use bundle_log_tools::server::{build_router, AppState};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tower::ServiceExt;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn router(fixture: &str) -> Router {
    let path = fixture_path(fixture);
    let parsed = load_log(&path).expect("fixture should load");
    build_router(AppState::new(parsed, path), "/viewer.html")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).expect("body should be JSON"))
}

#[tokio::test]
async fn serves_viewer_page() {
    let request = Request::get("/viewer.html").body(Body::empty()).unwrap();
    let (status, body) = send(router("pair_list.json"), request).await;

    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("<title>Build Log Viewer</title>"));
}

#[tokio::test]
async fn serves_raw_log_verbatim() {
    let request = Request::get("/build_log.json").body(Body::empty()).unwrap();
    let (status, body) = send(router("legacy_object.json"), request).await;

    assert_eq!(status, StatusCode::OK);
    let expected = std::fs::read(fixture_path("legacy_object.json")).unwrap();
    assert_eq!(body, expected);
}

#[tokio::test]
async fn summary_counts() {
    let (status, json) = get_json(router("pair_list.json"), "/api/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["assets"], 3);
    assert_eq!(json["bundles"], 3);
    assert_eq!(json["files"], 4);
    assert_eq!(json["guids"], 4);
}

#[tokio::test]
async fn asset_rows_filter_and_sort() {
    let (status, json) =
        get_json(router("pair_list.json"), "/api/assets?sort=bundles&dir=desc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["rows"][0]["path"], "Assets/UI/icon.png");
    assert_eq!(json["rows"][0]["bundle_count"], 2);

    let (_, json) = get_json(router("pair_list.json"), "/api/assets?q=scenes").await;
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["path"], "Assets/Scenes/Main.unity");
}

#[tokio::test]
async fn asset_bundles_and_lookup() {
    let (status, json) = get_json(
        router("pair_list.json"),
        "/api/assets/bundles?path=Assets%2FUI%2Ficon.png",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bundle_count"], 2);
    assert_eq!(json["bundles"]["3f2a9c"], serde_json::json!(["a1f0", "a1f1"]));

    let (_, json) = get_json(
        router("pair_list.json"),
        "/api/assets/lookup?path=Assets%2FUI%2Ficon.png",
    )
    .await;
    assert_eq!(json["bundles"], serde_json::json!(["3f2a9c", "77be01"]));
}

#[tokio::test]
async fn unknown_asset_has_no_bundles() {
    let (status, json) =
        get_json(router("pair_list.json"), "/api/assets/bundles?path=nope").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bundle_count"], 0);
    assert!(json["bundles"].is_null());
}

#[tokio::test]
async fn bundle_content() {
    let (status, json) = get_json(router("pair_list.json"), "/api/bundles/77be01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hash"], "77be01");
    assert_eq!(json["crc"], "0x9a11");
    assert_eq!(json["files"][0]["guid"], "a1f0");
    assert!(json["files"][0].get("size").is_none());
}

#[tokio::test]
async fn unknown_bundle_is_not_found() {
    let (status, json) = get_json(router("pair_list.json"), "/api/bundles/ffffff").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn compare_uploaded_log_against_primary() {
    let upload = std::fs::read_to_string(fixture_path("previous.json")).unwrap();
    let request = Request::post("/api/compare")
        .header("content-type", "application/json")
        .body(Body::from(upload))
        .unwrap();
    let (status, body) = send(router("current.json"), request).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["addedAssets"], serde_json::json!(["A2.png", "B.prefab"]));
    assert_eq!(json["removedAssets"], serde_json::json!(["Old.mat"]));
    assert_eq!(json["bundleChanges"]["b1"]["status"], "modified");
    assert_eq!(json["bundleChanges"]["b2"]["status"], "added");
    assert_eq!(json["bundleChanges"]["b3"]["status"], "removed");
}

#[tokio::test]
async fn compare_with_itself_is_empty() {
    let upload = std::fs::read_to_string(fixture_path("legacy_object.json")).unwrap();
    let request = Request::post("/api/compare")
        .body(Body::from(upload))
        .unwrap();
    let (status, body) = send(router("pair_list.json"), request).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"addedAssets": [], "removedAssets": [], "bundleChanges": {}})
    );
}

#[tokio::test]
async fn compare_accepts_multi_megabyte_log() {
    const ASSETS: usize = 60_000;
    let assets: serde_json::Map<String, Value> = (0..ASSETS)
        .map(|i| {
            let mut bundles = serde_json::Map::new();
            bundles.insert(
                format!("bundle_{:03}", i % 500),
                serde_json::json!([format!("guid-{i:08x}")]),
            );
            (
                format!("Assets/Generated/asset_{i:05}.png"),
                Value::Object(bundles),
            )
        })
        .collect();
    let upload = serde_json::to_vec(&serde_json::json!({ "assets": assets })).unwrap();
    assert!(upload.len() > 2 * 1024 * 1024, "upload is {} bytes", upload.len());

    let request = Request::post("/api/compare")
        .header("content-type", "application/json")
        .body(Body::from(upload))
        .unwrap();
    let (status, body) = send(router("pair_list.json"), request).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["removedAssets"].as_array().unwrap().len(), ASSETS);
    assert_eq!(json["addedAssets"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn compare_rejects_invalid_json() {
    let app = router("pair_list.json");
    let request = Request::post("/api/compare")
        .body(Body::from("{\"assets\": ["))
        .unwrap();
    let (status, body) = send(app.clone(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "bad_request");

    // The primary snapshot is untouched
    let (status, json) = get_json(app, "/api/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["assets"], 3);
}

#[tokio::test]
async fn custom_page_path() {
    let path = fixture_path("pair_list.json");
    let parsed = load_log(&path).unwrap();
    let app = build_router(AppState::new(parsed, path), "/index.html");

    let request = Request::get("/index.html").body(Body::empty()).unwrap();
    let (status, _) = send(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::get("/viewer.html").body(Body::empty()).unwrap();
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
