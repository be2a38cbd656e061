use tempfile::tempdir;
use wordmask_store::error::StoreError;
use wordmask_store::query::{search, SearchParams};
use wordmask_store::storejson::JsonStoreWriter;
use wordmask_store::{vowels, WordStoreWriter};

fn seed(words: &[&str]) -> (tempfile::TempDir, String) {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("store").to_str().unwrap().to_string();
    let owned: Vec<String> = words.iter().map(|s| s.to_string()).collect();
    let mut w = JsonStoreWriter::default();
    w.write_store(&owned, &out).unwrap();
    (tmp, out)
}

#[test]
fn limit_caps_result() {
    let words: Vec<String> = (0..20).map(|i| format!("кот{i}")).collect();
    let refs: Vec<&str> = words.iter().map(|s| s.as_str()).collect();
    let (_tmp, store) = seed(&refs);

    let hits = search(
        &store,
        &SearchParams {
            pattern: "кот*".into(),
            limit: 5,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(hits.len(), 5);
}

#[test]
fn filter_conjunction_is_subset() {
    let (_tmp, store) = seed(&["кот", "кит", "сокол", "молот", "корова", "страна"]);

    let narrowed = search(
        &store,
        &SearchParams {
            pattern: "*".into(),
            length: Some(5),
            max_vowels: Some(2),
            ..Default::default()
        },
    )
    .unwrap();
    let by_length = search(
        &store,
        &SearchParams {
            pattern: "*".into(),
            length: Some(5),
            ..Default::default()
        },
    )
    .unwrap();

    for w in &narrowed {
        assert_eq!(w.chars().count(), 5);
        assert!(vowels::vowel_count(w) <= 2);
        assert!(by_length.contains(w));
    }
}

#[test]
fn no_match_is_empty_not_error() {
    let (_tmp, store) = seed(&["кот", "кит"]);
    let hits = search(
        &store,
        &SearchParams {
            pattern: "собака*".into(),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(hits.is_empty());
}

#[test]
fn missing_store_is_query_error() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("нет").to_str().unwrap().to_string();
    let err = search(&missing, &SearchParams::default()).unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));
}
