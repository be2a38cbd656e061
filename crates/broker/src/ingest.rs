// crates/broker/src/ingest.rs
use wordmask_store::storejson::{JsonStoreReader, JsonStoreWriter};
use wordmask_store::{WordStoreReader, WordStoreWriter};

/// Принимает батч слов и достраивает хранилище (at-most-once по слову).
/// Возвращает статус для ответа.
pub fn handle_batch(words: Vec<String>, store_dir: &str) -> anyhow::Result<serde_json::Value> {
    let mut writer = JsonStoreWriter::default();
    let appended = writer.write_store(&words, store_dir)?;
    let total = JsonStoreReader::open_store(store_dir)?.word_count();
    Ok(serde_json::json!({
        "ok": true, "appended": appended, "total": total
    }))
}
