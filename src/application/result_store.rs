// Store for the most recent query outcome
use std::sync::Mutex;

use crate::domain::sensor_data::{QueryState, SensorData};

/// Holds the outcome of the most recent query for display.
///
/// Written only by the query coordinator, overwritten wholesale on every
/// completion. Ephemeral: a new session starts at `Idle`.
#[derive(Debug, Default)]
pub struct ResultStore {
    state: Mutex<QueryState>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> QueryState {
        self.state.lock().unwrap().clone()
    }

    pub(crate) fn set_loading(&self) {
        *self.state.lock().unwrap() = QueryState::Loading;
    }

    pub(crate) fn set_success(&self, data: SensorData) {
        *self.state.lock().unwrap() = QueryState::Success(data);
    }

    pub(crate) fn set_failure(&self, reason: String) {
        *self.state.lock().unwrap() = QueryState::Failure(reason);
    }
}
