//! Типизированные ошибки ядра.

use thiserror::Error;

/// Ошибки трёх операций ядра. «Занято» (поиск поверх поиска) — не отсюда:
/// это забота сессионного слоя, ядро сессий не знает.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Сбой построения хранилища. Уже записанные слова не повреждаются,
    /// повторный прогон безопасен (вставка at-most-once).
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    /// Сбой доступа к хранилищу при поиске.
    #[error("query failed: {0}")]
    Query(String),

    /// Сбой при пересчёте доменов фильтров; вызывающий сохраняет
    /// прежнее состояние фильтров.
    #[error("filter reconciliation failed: {0}")]
    Reconciliation(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
