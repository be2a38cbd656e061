// path: crates/broker/tests/helpers.rs
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt as _;
use tower::ServiceExt;

use broker::config::BrokerConfig;
use broker::http_api::{router, AppState};
use broker::session::SearchSession;
use wordmask_store::storejson::JsonStoreWriter;
use wordmask_store::WordStoreWriter;

pub fn seed_store(dir: &str, words: &[&str]) {
    let owned: Vec<String> = words.iter().map(|s| s.to_string()).collect();
    let mut w = JsonStoreWriter::default();
    w.write_store(&owned, dir).expect("seed store");
}

pub fn make_state(store_dir: &str) -> AppState {
    let cfg = BrokerConfig {
        addr: "127.0.0.1:0".into(),
        store_dir: store_dir.to_string(),
        default_limit: 1000,
    };
    AppState {
        cfg,
        session: SearchSession::new(),
    }
}

pub fn make_router(store_dir: &str) -> Router {
    router(make_state(store_dir))
}

/// POST с JSON-телом; ответ — статус плюс разобранное тело
/// (не-JSON тело, например текст 409, возвращается строкой).
pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let v = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, v)
}
