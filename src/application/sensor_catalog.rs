// Sensor catalog cache
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::remote_port::RemoteDataPort;
use crate::error::DashboardError;

/// Cached list of available sensors, fetched lazily once per session.
///
/// Unlike sensor data queries, the list is cached across calls: a failed
/// fetch is remembered as an error state and only retried after an
/// explicit `invalidate`. The cached state sits behind a cheap lock so
/// display reads answer immediately even while a fetch is in flight; the
/// async gate only collapses concurrent first calls into one remote
/// request.
pub struct SensorCatalog {
    remote: Arc<dyn RemoteDataPort>,
    state: Mutex<CatalogState>,
    fetch_gate: tokio::sync::Mutex<()>,
    fetching: AtomicBool,
}

#[derive(Debug, Clone, Default)]
enum CatalogState {
    #[default]
    Unfetched,
    Ready(Vec<String>),
    Failed(String),
}

impl SensorCatalog {
    pub fn new(remote: Arc<dyn RemoteDataPort>) -> Self {
        Self {
            remote,
            state: Mutex::new(CatalogState::Unfetched),
            fetch_gate: tokio::sync::Mutex::new(()),
            fetching: AtomicBool::new(false),
        }
    }

    /// Returns the sensor list, fetching it on first use.
    pub async fn list_sensors(&self) -> Result<Vec<String>, DashboardError> {
        if let Some(outcome) = self.cached() {
            return outcome;
        }

        let _gate = self.fetch_gate.lock().await;
        // Another caller may have finished the fetch while we waited.
        if let Some(outcome) = self.cached() {
            return outcome;
        }

        self.fetching.store(true, Ordering::Relaxed);
        let outcome = self.remote.fetch_sensors().await;
        self.fetching.store(false, Ordering::Relaxed);

        match outcome {
            Ok(sensors) => {
                *self.state.lock().unwrap() = CatalogState::Ready(sensors.clone());
                Ok(sensors)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch sensor catalog");
                *self.state.lock().unwrap() = CatalogState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Cached list for display; empty until a fetch has succeeded.
    pub fn sensors(&self) -> Vec<String> {
        match &*self.state.lock().unwrap() {
            CatalogState::Ready(sensors) => sensors.clone(),
            _ => Vec::new(),
        }
    }

    /// Reason of the last failed fetch, if the catalog is in an error
    /// state.
    pub fn error(&self) -> Option<String> {
        match &*self.state.lock().unwrap() {
            CatalogState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetching.load(Ordering::Relaxed)
    }

    /// Drops the cached list (or error) so the next call fetches again.
    pub fn invalidate(&self) {
        *self.state.lock().unwrap() = CatalogState::Unfetched;
    }

    fn cached(&self) -> Option<Result<Vec<String>, DashboardError>> {
        match &*self.state.lock().unwrap() {
            CatalogState::Ready(sensors) => Some(Ok(sensors.clone())),
            CatalogState::Failed(reason) => Some(Err(DashboardError::Remote(reason.clone()))),
            CatalogState::Unfetched => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::selection::QueryKey;
    use crate::domain::sensor_data::SensorData;

    struct FakeRemote {
        calls: AtomicUsize,
        fail: bool,
        delay: Option<Duration>,
    }

    impl FakeRemote {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
                delay: None,
            }
        }

        fn delayed(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new(false)
            }
        }
    }

    #[async_trait]
    impl RemoteDataPort for FakeRemote {
        async fn fetch_sensors(&self) -> Result<Vec<String>, DashboardError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(DashboardError::Remote("connection refused".to_string()));
            }
            Ok(vec!["sensor_001".to_string(), "sensor_002".to_string()])
        }

        async fn fetch_sensor_data(&self, _key: &QueryKey) -> Result<SensorData, DashboardError> {
            unreachable!("catalog never fetches sensor data")
        }
    }

    #[tokio::test]
    async fn test_list_is_fetched_once() {
        let remote = Arc::new(FakeRemote::new(false));
        let catalog = SensorCatalog::new(Arc::clone(&remote) as Arc<dyn RemoteDataPort>);

        let first = catalog.list_sensors().await.unwrap();
        let second = catalog.list_sensors().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_remembered_until_invalidated() {
        let remote = Arc::new(FakeRemote::new(true));
        let catalog = SensorCatalog::new(Arc::clone(&remote) as Arc<dyn RemoteDataPort>);

        assert!(catalog.list_sensors().await.is_err());
        assert!(catalog.list_sensors().await.is_err());
        // The failure state answers the second call without a new fetch.
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
        assert!(catalog.error().is_some());
        assert!(catalog.sensors().is_empty());

        catalog.invalidate();
        assert!(catalog.list_sensors().await.is_err());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_fetch() {
        let remote = Arc::new(FakeRemote::new(false));
        let catalog = SensorCatalog::new(Arc::clone(&remote) as Arc<dyn RemoteDataPort>);

        let (a, b) = tokio::join!(catalog.list_sensors(), catalog.list_sensors());
        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readers_answer_during_in_flight_fetch() {
        let remote = Arc::new(FakeRemote::delayed(Duration::from_millis(100)));
        let catalog = Arc::new(SensorCatalog::new(
            Arc::clone(&remote) as Arc<dyn RemoteDataPort>
        ));

        let fetcher = Arc::clone(&catalog);
        let fetch = tokio::spawn(async move { fetcher.list_sensors().await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        // The fetch is still in flight; reads come from the last known
        // state instead of waiting for it.
        assert!(catalog.is_loading());
        assert!(catalog.sensors().is_empty());
        assert!(catalog.error().is_none());

        fetch.await.unwrap().unwrap();
        assert!(!catalog.is_loading());
        assert_eq!(catalog.sensors().len(), 2);
    }
}
