// Query coordinator - single-flight query execution with a staleness guard
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::remote_port::RemoteDataPort;
use crate::application::request_history::RequestHistory;
use crate::application::result_store::ResultStore;
use crate::application::selection_state::SelectionState;
use crate::domain::selection::QueryKey;
use crate::domain::sensor_data::SensorData;
use crate::error::DashboardError;

type FetchOutcome = Result<SensorData, DashboardError>;
type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;

/// Executes sensor data queries against the current selection.
///
/// Each key has at most one remote call in flight: concurrent `run`
/// calls for the same key join it. The fetch itself executes on a
/// spawned task, so its completion is applied exactly once even when no
/// caller is still awaiting. A completion only touches the result store
/// and the history when its key still matches the current selection, so
/// a slow superseded fetch cannot overwrite fresher state.
///
/// Re-running a key after completion always issues a fresh remote call;
/// sensor data is never cached across explicit re-runs.
#[derive(Clone)]
pub struct QueryCoordinator {
    remote: Arc<dyn RemoteDataPort>,
    selection: Arc<SelectionState>,
    results: Arc<ResultStore>,
    history: Arc<RequestHistory>,
    in_flight: Arc<Mutex<HashMap<QueryKey, SharedFetch>>>,
}

impl QueryCoordinator {
    pub fn new(
        remote: Arc<dyn RemoteDataPort>,
        selection: Arc<SelectionState>,
        results: Arc<ResultStore>,
        history: Arc<RequestHistory>,
    ) -> Self {
        Self {
            remote,
            selection,
            results,
            history,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs a query for the current selection.
    pub async fn run_current(&self) -> FetchOutcome {
        let key = self.selection.query_key().ok_or_else(|| {
            DashboardError::Validation(
                "both a sensor and a data type must be selected".to_string(),
            )
        })?;
        self.run(key).await
    }

    /// Runs a query for `key`.
    ///
    /// An invalid key fails immediately with a validation error, before
    /// any state transition or remote call.
    pub async fn run(&self, key: QueryKey) -> FetchOutcome {
        key.validate()?;
        self.join_or_start(&key).await
    }

    fn join_or_start(&self, key: &QueryKey) -> SharedFetch {
        let mut in_flight = self.in_flight.lock().unwrap();
        if let Some(existing) = in_flight.get(key) {
            debug!(key = %key, "joining in-flight query");
            return existing.clone();
        }

        if self.is_current(key) {
            self.results.set_loading();
        }

        let (tx, rx) = oneshot::channel();
        let coordinator = self.clone();
        let owned = key.clone();
        tokio::spawn(async move {
            debug!(key = %owned, "fetching sensor data");
            let outcome = coordinator.remote.fetch_sensor_data(&owned).await;
            coordinator.in_flight.lock().unwrap().remove(&owned);
            coordinator.apply_completion(&owned, &outcome);
            let _ = tx.send(outcome);
        });

        let fetch: SharedFetch = rx
            .map(|received| {
                received.unwrap_or_else(|_| {
                    Err(DashboardError::Remote("query task aborted".to_string()))
                })
            })
            .boxed()
            .shared();
        in_flight.insert(key.clone(), fetch.clone());
        fetch
    }

    fn is_current(&self, key: &QueryKey) -> bool {
        self.selection.query_key().as_ref() == Some(key)
    }

    fn apply_completion(&self, key: &QueryKey, outcome: &FetchOutcome) {
        if !self.is_current(key) {
            debug!(key = %key, "ignoring completion for superseded selection");
            return;
        }
        match outcome {
            Ok(data) => {
                self.results.set_success(data.clone());
                if let Err(err) = self.history.record(key, data.execution_time) {
                    warn!(error = %err, "failed to persist request history");
                }
            }
            Err(err) => self.results.set_failure(err.to_string()),
        }
    }
}
