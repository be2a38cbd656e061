// path: crates/broker/tests/e2e_busy.rs
use axum::http::StatusCode;
use serde_json::json;

use broker::http_api::router;

mod helpers;
use helpers::{make_state, post_json, seed_store};

#[tokio::test]
async fn search_while_busy_is_rejected_not_queued() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("store").to_str().unwrap().to_string();
    seed_store(&dir, &["кот"]);

    let state = make_state(&dir);
    // Держим сессию занятой, как будто предыдущий поиск ещё идёт
    let permit = state.session.try_begin().expect("свободная сессия");

    let app = router(state.clone());
    let (status, _) = post_json(app.clone(), "/search", json!({"pattern": "ко*"})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Пересчёт фильтров — та же операция с точки зрения занятости
    let (status, _) = post_json(
        app.clone(),
        "/filters",
        json!({"change": "pattern", "pattern": "ко*"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // После завершения сессия снова принимает запросы
    drop(permit);
    let (status, v) = post_json(app, "/search", json!({"pattern": "ко*"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["count"], 1);
}
