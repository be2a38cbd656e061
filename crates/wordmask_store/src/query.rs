// Файл: crates/wordmask_store/src/query.rs
use anyhow::Result;
use croaring::Bitmap;

use crate::error::StoreError;
use crate::pattern::{self, LengthBounds};
use crate::storejson::JsonStoreReader;
use crate::WordStoreReader;

/// Жёсткий потолок результата по умолчанию.
pub const DEFAULT_LIMIT: usize = 1000;

/// Параметры одного запроса: шаблон, фильтры, потолок результата.
/// Фильтр длины — точное совпадение, фильтр гласных — верхняя граница
/// включительно; асимметрия намеренная.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub pattern: String,
    pub length: Option<u32>,
    pub max_vowels: Option<u32>,
    pub limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            length: None,
            max_vowels: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Поиск слов по шаблону и фильтрам. Слова идут в порядке обхода
/// хранилища; для вызывающего порядок смысла не несёт.
pub fn search(store_dir: &str, params: &SearchParams) -> crate::error::Result<Vec<String>> {
    search_store(store_dir, params).map_err(|e| StoreError::Query(e.to_string()))
}

fn search_store(store_dir: &str, params: &SearchParams) -> Result<Vec<String>> {
    let reader = JsonStoreReader::open_store(store_dir)?;
    search_reader(&reader, params)
}

/// Поиск на уже открытом хранилище.
pub fn search_reader<R: WordStoreReader>(reader: &R, params: &SearchParams) -> Result<Vec<String>> {
    let mask = pattern::compile(&params.pattern);
    // Пустой шаблон совпадает со всеми словами: ни границ, ни проверки.
    let (bounds, rx) = if mask.is_empty() {
        (LengthBounds::unbounded(), None)
    } else {
        (
            pattern::mask_length_bounds(&mask),
            Some(pattern::mask_to_regex(&mask)?),
        )
    };

    let bm = reader.prefilter(params.length, params.max_vowels, &bounds);

    let mut words = Vec::new();
    for word_id in bm.iter() {
        if words.len() >= params.limit {
            break;
        }
        if let Some(rec) = reader.get_word(word_id) {
            if rx.as_ref().map_or(true, |rx| rx.is_match(&rec.word)) {
                words.push(rec.word.clone());
            }
        }
    }
    Ok(words)
}

/// Битмап всех слов, совпадающих с шаблоном. Нужен пересчёту доменов:
/// ограничения фильтров накладываются потом пересечением с индексами.
pub fn matched_bitmap<R: WordStoreReader>(reader: &R, pattern: &str) -> Result<Bitmap> {
    let mask = pattern::compile(pattern);
    if mask.is_empty() {
        return Ok(reader.prefilter(None, None, &LengthBounds::unbounded()));
    }
    let bounds = pattern::mask_length_bounds(&mask);
    let rx = pattern::mask_to_regex(&mask)?;

    let candidates = reader.prefilter(None, None, &bounds);
    let mut out = Bitmap::new();
    for word_id in candidates.iter() {
        if let Some(rec) = reader.get_word(word_id) {
            if rx.is_match(&rec.word) {
                out.add(word_id);
            }
        }
    }
    Ok(out)
}
