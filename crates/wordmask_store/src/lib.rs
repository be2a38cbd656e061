pub mod error;
pub mod pattern;
pub mod query;
pub mod reconcile;
pub mod storejson;
pub mod vowels;
pub mod wordlist;

use anyhow::Result;
use croaring::Bitmap;
use serde::{Deserialize, Serialize};

use crate::pattern::LengthBounds;

/// Единица данных: слово плюс предвычисленные атрибуты.
/// После вставки не меняется; удаление — только пересборкой хранилища.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordRecord {
    pub word_id: u32,     // локальный id в хранилище (порядок вставки)
    pub word: String,     // уникальный ключ
    pub length: u32,      // число символов, не байт
    pub vowel_count: u32, // гласные из vowels::VOWELS
}

impl WordRecord {
    /// Запись с атрибутами, вычисленными из самого слова.
    pub fn new(word_id: u32, word: &str) -> Self {
        Self {
            word_id,
            word: word.to_string(),
            length: vowels::char_len(word),
            vowel_count: vowels::vowel_count(word),
        }
    }
}

/// Метаданные хранилища (минимум для V1)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetaV1 {
    pub version: u32, // 1
    pub word_count: u32,
}

/// Точки расширения: писатель/читатель хранилища
pub trait WordStoreWriter {
    /// Построить или дополнить хранилище из списка слов
    /// (at-most-once по слову: дубликат — no-op, не перезапись).
    fn write_store(&mut self, words: &[String], out_dir: &str) -> error::Result<usize>;
}

pub trait WordStoreReader {
    fn open_store(path: &str) -> Result<Self>
    where
        Self: Sized;
    fn word_count(&self) -> u32;
    /// Сузить множество кандидатов по индексам длины и числа гласных
    /// (точная длина, границы длины из маски, верхняя граница гласных).
    fn prefilter(&self, length: Option<u32>, max_vowels: Option<u32>, bounds: &LengthBounds)
        -> Bitmap;
    /// Достать запись
    fn get_word(&self, word_id: u32) -> Option<&WordRecord>;
    /// Различные длины среди id из `within`, по возрастанию.
    fn distinct_lengths(&self, within: &Bitmap) -> Vec<u32>;
    /// Различные числа гласных среди id из `within`, по возрастанию.
    fn distinct_vowel_counts(&self, within: &Bitmap) -> Vec<u32>;
}
