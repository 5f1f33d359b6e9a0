// Session wiring - Dependency injection for one dashboard session
use std::sync::Arc;

use crate::application::query_coordinator::QueryCoordinator;
use crate::application::remote_port::RemoteDataPort;
use crate::application::request_history::RequestHistory;
use crate::application::result_store::ResultStore;
use crate::application::selection_state::SelectionState;
use crate::application::sensor_catalog::SensorCatalog;
use crate::application::storage_port::StoragePort;

/// The coordination components for one dashboard session, wired together.
///
/// Selection, coordinator state and the result store start fresh; the
/// request history is loaded from storage and is the only part that
/// survives a reload.
pub struct DashboardSession {
    pub selection: Arc<SelectionState>,
    pub catalog: SensorCatalog,
    pub coordinator: QueryCoordinator,
    pub results: Arc<ResultStore>,
    pub history: Arc<RequestHistory>,
}

impl DashboardSession {
    pub fn new(remote: Arc<dyn RemoteDataPort>, storage: Arc<dyn StoragePort>) -> Self {
        let selection = Arc::new(SelectionState::new());
        let results = Arc::new(ResultStore::new());
        let history = Arc::new(RequestHistory::load(storage));
        let coordinator = QueryCoordinator::new(
            Arc::clone(&remote),
            Arc::clone(&selection),
            Arc::clone(&results),
            Arc::clone(&history),
        );
        let catalog = SensorCatalog::new(remote);

        Self {
            selection,
            catalog,
            coordinator,
            results,
            history,
        }
    }
}
