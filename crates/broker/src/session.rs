use std::sync::Arc;
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use wordmask_store::reconcile::SessionState;

/// Сессия оператора: состояние фильтров плюс признак «операция уже идёт».
/// Новый поиск при занятой сессии отклоняется сразу, без очереди, чтобы
/// обновления не приходили вперемешку. Отмены нет: занятая сессия просто
/// не принимает новых запросов до завершения текущего.
#[derive(Clone)]
pub struct SearchSession {
    busy: Arc<Semaphore>,
    state: Arc<Mutex<SessionState>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            busy: Arc::new(Semaphore::new(1)),
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Пытается занять сессию; None — операция уже выполняется.
    /// Сессия свободна, когда возвращённый пермит уронен.
    pub fn try_begin(&self) -> Option<OwnedSemaphorePermit> {
        self.busy.clone().try_acquire_owned().ok()
    }

    pub async fn state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn set_state(&self, next: SessionState) {
        *self.state.lock().await = next;
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
