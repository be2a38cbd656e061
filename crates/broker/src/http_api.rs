use axum::http::StatusCode;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use wordmask_store::query::{self, SearchParams};
use wordmask_store::reconcile::{self, DomainEntry, FilterChange};

use crate::config::BrokerConfig;
use crate::ingest;
use crate::session::SearchSession;

#[derive(Clone)]
pub struct AppState {
    pub cfg: BrokerConfig,
    pub session: SearchSession,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ingest", post(ingest_handler))
        .route("/search", post(search))
        .route("/filters", post(filters))
        .with_state(state)
}

// --- API модели ---

#[derive(Debug, Deserialize)]
pub struct SearchIn {
    pub pattern: String,
    pub length: Option<u32>,
    pub max_vowels: Option<u32>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchOut {
    pub words: Vec<String>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Переход фильтров; значение `null` внутри смены фильтра — сброс в «Все».
#[derive(Debug, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum FilterIn {
    Pattern { pattern: String },
    Length { length: Option<u32> },
    MaxVowels { max_vowels: Option<u32> },
}

#[derive(Debug, Serialize)]
pub struct FiltersOut {
    pub length_domain: Vec<DomainEntry>,
    pub vowel_domain: Vec<DomainEntry>,
    pub selected_length: Option<u32>,
    pub selected_max_vowels: Option<u32>,
}

// --- Обработчики ---

/// Оффлайн-шаг: построить или дополнить хранилище. Берёт сессию, чтобы
/// запись не шла одновременно с поиском.
pub async fn ingest_handler(
    State(st): State<AppState>,
    Json(words): Json<Vec<String>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let Some(_permit) = st.session.try_begin() else {
        return Err(busy());
    };

    let dir = st.cfg.store_dir.clone();
    let out = tokio::task::spawn_blocking(move || ingest::handle_batch(words, &dir))
        .await
        .map_err(internal)?
        .map_err(internal)?;
    Ok(Json(out))
}

/// Поиск. Сбой хранилища не роняет сессию: пустой результат плюс
/// сообщение оператору.
pub async fn search(
    State(st): State<AppState>,
    Json(req): Json<SearchIn>,
) -> Result<Json<SearchOut>, (StatusCode, String)> {
    let Some(_permit) = st.session.try_begin() else {
        return Err(busy());
    };

    let params = SearchParams {
        pattern: req.pattern,
        length: req.length,
        max_vowels: req.max_vowels,
        limit: req.limit.unwrap_or(st.cfg.default_limit),
    };
    let dir = st.cfg.store_dir.clone();
    let res = tokio::task::spawn_blocking(move || query::search(&dir, &params))
        .await
        .map_err(internal)?;

    match res {
        Ok(words) => Ok(Json(SearchOut {
            count: words.len(),
            words,
            error: None,
        })),
        Err(err) => {
            tracing::warn!(error = %err, "search failed; returning empty result");
            Ok(Json(SearchOut {
                words: Vec::new(),
                count: 0,
                error: Some(err.to_string()),
            }))
        }
    }
}

/// Пересчёт доменов фильтров. Состояние сессии обновляется только при
/// успехе; при ошибке остаётся последнее исправное.
pub async fn filters(
    State(st): State<AppState>,
    Json(req): Json<FilterIn>,
) -> Result<Json<FiltersOut>, (StatusCode, String)> {
    let Some(_permit) = st.session.try_begin() else {
        return Err(busy());
    };

    let change = match req {
        FilterIn::Pattern { pattern } => FilterChange::Pattern(pattern),
        FilterIn::Length { length } => FilterChange::Length(length),
        FilterIn::MaxVowels { max_vowels } => FilterChange::MaxVowels(max_vowels),
    };
    let prior = st.session.state().await;
    let dir = st.cfg.store_dir.clone();

    let res = tokio::task::spawn_blocking(move || reconcile::reconcile(&dir, &prior, change))
        .await
        .map_err(internal)?;

    match res {
        Ok(domains) => {
            st.session.set_state(domains.state.clone()).await;
            Ok(Json(FiltersOut {
                length_domain: domains.length_domain,
                vowel_domain: domains.vowel_domain,
                selected_length: domains.state.selected_length,
                selected_max_vowels: domains.state.selected_max_vowels,
            }))
        }
        Err(err) => {
            tracing::warn!(error = %err, "filter reconciliation failed; keeping prior state");
            Err(internal(err))
        }
    }
}

fn busy() -> (StatusCode, String) {
    (StatusCode::CONFLICT, "поиск уже выполняется".to_string())
}

fn internal<E: ToString>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
