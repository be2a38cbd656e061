// Файл: crates/wordmask_store/src/reconcile.rs
//! Согласование доменов фильтров: доступные значения каждого фильтра =
//! различные значения атрибута среди слов, совпадающих с шаблоном и
//! вторым активным фильтром. Пересчёт детерминирован и не зависит от
//! порядка результатов поиска.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::pattern::LengthBounds;
use crate::query::matched_bitmap;
use crate::storejson::JsonStoreReader;
use crate::WordStoreReader;

/// Метка «без ограничения» — первый пункт каждого домена.
pub const UNCONSTRAINED_LABEL: &str = "Все";

/// Состояние сессии: шаблон и выбранные значения фильтров. Явная
/// величина — передаётся в reconcile и возвращается из него, никакого
/// глобального состояния в ядре.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub pattern: String,
    pub selected_length: Option<u32>,
    pub selected_max_vowels: Option<u32>,
}

/// Дискретные переходы: новый шаблон либо смена одного из фильтров.
/// `None` внутри смены фильтра — сброс в «Все».
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Pattern(String),
    Length(Option<u32>),
    MaxVowels(Option<u32>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainEntry {
    pub label: String,
    pub value: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterDomains {
    pub length_domain: Vec<DomainEntry>,
    pub vowel_domain: Vec<DomainEntry>,
    pub state: SessionState,
}

/// Пересчёт доменов после одного перехода. При ошибке доступа к
/// хранилищу возвращается Err, а прежнее состояние остаётся у
/// вызывающего нетронутым: новое существует только внутри Ok.
pub fn reconcile(
    store_dir: &str,
    prior: &SessionState,
    change: FilterChange,
) -> Result<FilterDomains> {
    reconcile_impl(store_dir, prior, change).map_err(|e| StoreError::Reconciliation(e.to_string()))
}

fn reconcile_impl(
    store_dir: &str,
    prior: &SessionState,
    change: FilterChange,
) -> anyhow::Result<FilterDomains> {
    let reader = JsonStoreReader::open_store(store_dir)?;
    reconcile_reader(&reader, prior, change)
}

/// Пересчёт на уже открытом хранилище.
pub fn reconcile_reader<R: WordStoreReader>(
    reader: &R,
    prior: &SessionState,
    change: FilterChange,
) -> anyhow::Result<FilterDomains> {
    match change {
        // Новый поиск: оба домена от одного шаблона, оба выбора сброшены.
        FilterChange::Pattern(pattern) => domains_for_pattern(reader, pattern),

        // Сброс фильтра в «Все» — как новый поиск по прежнему шаблону.
        FilterChange::Length(None) | FilterChange::MaxVowels(None) => {
            domains_for_pattern(reader, prior.pattern.clone())
        }

        FilterChange::Length(Some(len)) => {
            let matched = matched_bitmap(reader, &prior.pattern)?;

            // Домен гласных: шаблон плюс выбранная длина.
            let mut with_len = reader.prefilter(Some(len), None, &LengthBounds::unbounded());
            with_len.and_inplace(&matched);
            let vowel_values = reader.distinct_vowel_counts(&with_len);

            // Выбор гласных живёт, пока входит в новый домен.
            let selected_max_vowels = prior
                .selected_max_vowels
                .filter(|v| vowel_values.contains(v));

            // Домен длин: шаблон плюс уцелевший фильтр гласных.
            let mut with_vowels =
                reader.prefilter(None, selected_max_vowels, &LengthBounds::unbounded());
            with_vowels.and_inplace(&matched);
            let length_values = reader.distinct_lengths(&with_vowels);

            Ok(FilterDomains {
                length_domain: domain(&length_values),
                vowel_domain: domain(&vowel_values),
                state: SessionState {
                    pattern: prior.pattern.clone(),
                    selected_length: Some(len),
                    selected_max_vowels,
                },
            })
        }

        // Зеркально смене длины.
        FilterChange::MaxVowels(Some(max_vowels)) => {
            let matched = matched_bitmap(reader, &prior.pattern)?;

            let mut with_vowels =
                reader.prefilter(None, Some(max_vowels), &LengthBounds::unbounded());
            with_vowels.and_inplace(&matched);
            let length_values = reader.distinct_lengths(&with_vowels);

            let selected_length = prior.selected_length.filter(|v| length_values.contains(v));

            let mut with_len = reader.prefilter(selected_length, None, &LengthBounds::unbounded());
            with_len.and_inplace(&matched);
            let vowel_values = reader.distinct_vowel_counts(&with_len);

            Ok(FilterDomains {
                length_domain: domain(&length_values),
                vowel_domain: domain(&vowel_values),
                state: SessionState {
                    pattern: prior.pattern.clone(),
                    selected_length,
                    selected_max_vowels: Some(max_vowels),
                },
            })
        }
    }
}

fn domains_for_pattern<R: WordStoreReader>(
    reader: &R,
    pattern: String,
) -> anyhow::Result<FilterDomains> {
    let matched = matched_bitmap(reader, &pattern)?;
    let length_values = reader.distinct_lengths(&matched);
    let vowel_values = reader.distinct_vowel_counts(&matched);
    Ok(FilterDomains {
        length_domain: domain(&length_values),
        vowel_domain: domain(&vowel_values),
        state: SessionState {
            pattern,
            selected_length: None,
            selected_max_vowels: None,
        },
    })
}

/// «Все» первым пунктом, дальше значения по возрастанию.
fn domain(values: &[u32]) -> Vec<DomainEntry> {
    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(DomainEntry {
        label: UNCONSTRAINED_LABEL.to_string(),
        value: None,
    });
    for v in values {
        out.push(DomainEntry {
            label: v.to_string(),
            value: Some(*v),
        });
    }
    out
}
