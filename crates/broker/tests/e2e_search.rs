// path: crates/broker/tests/e2e_search.rs
use axum::http::StatusCode;
use serde_json::json;

mod helpers;
use helpers::{make_router, post_json, seed_store};

#[tokio::test]
async fn http_search_matches_prefix_pattern() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("store").to_str().unwrap().to_string();
    seed_store(&dir, &["кот", "кит", "корова"]);

    let app = make_router(&dir);
    let (status, v) = post_json(app, "/search", json!({"pattern": "ко*"})).await;

    assert_eq!(status, StatusCode::OK);
    let words: Vec<&str> = v["words"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w.as_str().unwrap())
        .collect();
    assert!(words.contains(&"кот"));
    assert!(words.contains(&"корова"));
    assert!(!words.contains(&"кит"));
    assert_eq!(v["count"], 2);
    assert!(v.get("error").is_none());
}

#[tokio::test]
async fn http_search_applies_filters_and_limit() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("store").to_str().unwrap().to_string();
    seed_store(&dir, &["кот", "кит", "сок", "корова", "молоко"]);

    let app = make_router(&dir);
    let (status, v) = post_json(
        app.clone(),
        "/search",
        json!({"pattern": "*", "length": 3, "max_vowels": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["count"], 3); // кот, кит, сок

    let (_, v) = post_json(app, "/search", json!({"pattern": "*", "limit": 2})).await;
    assert_eq!(v["count"], 2);
}

#[tokio::test]
async fn http_search_on_missing_store_returns_empty_with_error() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("нет_хранилища").to_str().unwrap().to_string();

    let app = make_router(&dir);
    let (status, v) = post_json(app, "/search", json!({"pattern": "ко*"})).await;

    // Сбой хранилища не валит сессию: пустой результат плюс сообщение
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["count"], 0);
    assert!(v["words"].as_array().unwrap().is_empty());
    assert!(v["error"].as_str().unwrap().contains("query failed"));
}
