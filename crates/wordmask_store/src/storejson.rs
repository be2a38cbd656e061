// Файл: crates/wordmask_store/src/storejson.rs
use crate::error::{Result, StoreError};
use crate::pattern::LengthBounds;
use crate::{StoreMetaV1, WordRecord, WordStoreReader, WordStoreWriter};

use croaring::Bitmap;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// JSON-реализация хранилища V1:
/// - words.jsonl      : WordRecord по строке (с word_id)
/// - len_index.json   : { длина -> [word_id, ...] }
/// - vowel_index.json : { число гласных -> [word_id, ...] }
/// - meta.json        : StoreMetaV1
#[derive(Default)]
pub struct JsonStoreWriter {
    records: Vec<WordRecord>,
    seen: HashSet<String>,
}

impl WordStoreWriter for JsonStoreWriter {
    fn write_store(&mut self, words: &[String], out_dir: &str) -> Result<usize> {
        self.write_impl(words, out_dir)
            .map_err(|e| StoreError::Ingestion(e.to_string()))
    }
}

impl JsonStoreWriter {
    fn write_impl(&mut self, words: &[String], out_dir: &str) -> anyhow::Result<usize> {
        fs::create_dir_all(out_dir)?;
        self.load_existing(out_dir)?;

        let mut appended = 0usize;
        for w in words {
            let w = w.trim();
            if w.is_empty() {
                continue;
            }
            let length = crate::vowels::char_len(w);
            let vowel_count = crate::vowels::vowel_count(w);
            if self.insert_if_absent(w, length, vowel_count) {
                appended += 1;
            }
        }

        self.commit(out_dir)?;
        Ok(appended)
    }

    /// Подхватывает уже записанное хранилище: повторный прогон по тому же
    /// списку не дублирует слова и не меняет существующие id.
    fn load_existing(&mut self, out_dir: &str) -> anyhow::Result<()> {
        let docs_path = format!("{}/words.jsonl", out_dir);
        if !Path::new(&docs_path).exists() {
            return Ok(());
        }
        for rec in read_jsonl::<WordRecord>(&docs_path)? {
            self.seen.insert(rec.word.clone());
            self.records.push(rec);
        }
        Ok(())
    }

    /// Вставка at-most-once: слово с существующим ключом игнорируется.
    /// Запись с нарушенным инвариантом — ошибка программирования, паника.
    pub fn insert_if_absent(&mut self, word: &str, length: u32, vowel_count: u32) -> bool {
        assert_eq!(
            length as usize,
            word.chars().count(),
            "length не равно числу символов: {word:?}"
        );
        assert!(vowel_count <= length, "vowel_count больше length: {word:?}");
        if !self.seen.insert(word.to_string()) {
            return false;
        }
        let word_id = self.records.len() as u32;
        self.records.push(WordRecord {
            word_id,
            word: word.to_string(),
            length,
            vowel_count,
        });
        true
    }

    fn commit(&self, out_dir: &str) -> anyhow::Result<()> {
        // Индексы пересобираются из полного набора записей.
        let mut len_index: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        let mut vowel_index: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for rec in &self.records {
            len_index.entry(rec.length).or_default().push(rec.word_id);
            vowel_index
                .entry(rec.vowel_count)
                .or_default()
                .push(rec.word_id);
        }

        // words.jsonl
        let docs_path = format!("{}/words.jsonl", out_dir);
        let mut df = File::create(&docs_path)?;
        for rec in &self.records {
            serde_json::to_writer(&mut df, rec)?;
            df.write_all(b"\n")?;
        }

        // len_index.json
        let mut lf = File::create(format!("{}/len_index.json", out_dir))?;
        serde_json::to_writer_pretty(&mut lf, &len_index)?;

        // vowel_index.json
        let mut vf = File::create(format!("{}/vowel_index.json", out_dir))?;
        serde_json::to_writer_pretty(&mut vf, &vowel_index)?;

        // meta.json
        let meta = StoreMetaV1 {
            version: 1,
            word_count: self.records.len() as u32,
        };
        let mut mf = File::create(format!("{}/meta.json", out_dir))?;
        serde_json::to_writer_pretty(&mut mf, &meta)?;
        Ok(())
    }
}

pub struct JsonStoreReader {
    meta: StoreMetaV1,
    records: Vec<WordRecord>,
    len_index: BTreeMap<u32, Bitmap>,
    vowel_index: BTreeMap<u32, Bitmap>,
}

impl WordStoreReader for JsonStoreReader {
    fn open_store(path: &str) -> anyhow::Result<Self> {
        let meta: StoreMetaV1 = read_json(&format!("{}/meta.json", path))?;

        let len_map: BTreeMap<u32, Vec<u32>> = read_json(&format!("{}/len_index.json", path))?;
        let vowel_map: BTreeMap<u32, Vec<u32>> = read_json(&format!("{}/vowel_index.json", path))?;

        let records = read_jsonl::<WordRecord>(&format!("{}/words.jsonl", path))?;

        Ok(Self {
            meta,
            records,
            len_index: postings_from(len_map),
            vowel_index: postings_from(vowel_map),
        })
    }

    fn word_count(&self) -> u32 {
        self.meta.word_count
    }

    fn prefilter(
        &self,
        length: Option<u32>,
        max_vowels: Option<u32>,
        bounds: &LengthBounds,
    ) -> Bitmap {
        // Старт: все id, дальше только пересечения.
        let mut acc = Bitmap::new();
        if self.meta.word_count > 0 {
            acc.add_range(0..self.meta.word_count);
        }

        if let Some(len) = length {
            acc.and_inplace(&posting(&self.len_index, len));
        }
        if let Some(exact) = bounds.exact {
            acc.and_inplace(&posting(&self.len_index, exact));
        } else if bounds.min > 0 {
            let mut long_enough = Bitmap::new();
            for (_, bm) in self.len_index.range(bounds.min..) {
                long_enough.or_inplace(bm);
            }
            acc.and_inplace(&long_enough);
        }
        if let Some(v) = max_vowels {
            let mut few_vowels = Bitmap::new();
            for (_, bm) in self.vowel_index.range(..=v) {
                few_vowels.or_inplace(bm);
            }
            acc.and_inplace(&few_vowels);
        }
        acc
    }

    fn get_word(&self, word_id: u32) -> Option<&WordRecord> {
        self.records.get(word_id as usize)
    }

    fn distinct_lengths(&self, within: &Bitmap) -> Vec<u32> {
        distinct(&self.len_index, within)
    }

    fn distinct_vowel_counts(&self, within: &Bitmap) -> Vec<u32> {
        distinct(&self.vowel_index, within)
    }
}

// -------- helpers --------
fn postings_from(map: BTreeMap<u32, Vec<u32>>) -> BTreeMap<u32, Bitmap> {
    let mut out = BTreeMap::new();
    for (key, ids) in map.into_iter() {
        let mut bm = Bitmap::new();
        for id in ids {
            bm.add(id);
        }
        out.insert(key, bm);
    }
    out
}

fn posting(index: &BTreeMap<u32, Bitmap>, key: u32) -> Bitmap {
    index.get(&key).cloned().unwrap_or_else(Bitmap::new)
}

/// Ключи индекса, чьи битмапы пересекаются с `within` (по возрастанию).
fn distinct(index: &BTreeMap<u32, Bitmap>, within: &Bitmap) -> Vec<u32> {
    let mut out = Vec::new();
    for (key, bm) in index {
        let mut common = bm.clone();
        common.and_inplace(within);
        if !common.is_empty() {
            out.push(*key);
        }
    }
    out
}

fn read_json<T: for<'de> serde::Deserialize<'de>>(path: &str) -> anyhow::Result<T> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(f)?)
}

fn read_jsonl<T: for<'de> serde::Deserialize<'de>>(path: &str) -> anyhow::Result<Vec<T>> {
    let f = File::open(path)?;
    let br = BufReader::new(f);
    let mut out = Vec::new();
    for line in br.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}
