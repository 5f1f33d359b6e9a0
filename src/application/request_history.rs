// Durable request history service
use std::sync::{Arc, Mutex};

use crate::application::storage_port::StoragePort;
use crate::domain::history::{RequestLog, RequestRecord};
use crate::domain::selection::QueryKey;
use crate::error::DashboardError;

/// Storage key the history is persisted under.
const STORAGE_KEY: &str = "history";

/// Bounded, durable log of completed requests.
///
/// The log survives a client reload; everything else in the coordination
/// layer starts a new session empty. Only successful completions are
/// recorded.
pub struct RequestHistory {
    storage: Arc<dyn StoragePort>,
    log: Mutex<RequestLog>,
}

impl RequestHistory {
    /// Loads any persisted history. An unreadable or corrupt snapshot is
    /// logged and treated as empty rather than failing construction.
    pub fn load(storage: Arc<dyn StoragePort>) -> Self {
        let log = match storage.load(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<RequestRecord>>(&raw) {
                Ok(records) => RequestLog::from_records(records),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable history snapshot");
                    RequestLog::new()
                }
            },
            Ok(None) => RequestLog::new(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load request history");
                RequestLog::new()
            }
        };

        Self {
            storage,
            log: Mutex::new(log),
        }
    }

    /// Appends a record for a completed request and persists the updated
    /// log. The in-memory log advances even when persistence fails; the
    /// error is returned so the caller can log it.
    ///
    /// Update and persist happen under the log lock, so interleaved
    /// completions cannot write their snapshots out of order and leave a
    /// stale one as the durable state.
    pub fn record(&self, key: &QueryKey, execution_time: f64) -> Result<(), DashboardError> {
        let record = RequestRecord::new(&key.sensor, key.data_type.as_str(), execution_time);
        let mut log = self.log.lock().unwrap();
        *log = log.with_record(record);
        self.persist(&log)
    }

    /// Removes all entries, in memory and in storage.
    pub fn clear(&self) -> Result<(), DashboardError> {
        let mut log = self.log.lock().unwrap();
        *log = RequestLog::cleared();
        self.persist(&log)
    }

    /// Records newest first.
    pub fn list(&self) -> Vec<RequestRecord> {
        self.log.lock().unwrap().records().to_vec()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().unwrap().is_empty()
    }

    fn persist(&self, log: &RequestLog) -> Result<(), DashboardError> {
        let raw = serde_json::to_string(log)
            .map_err(|err| DashboardError::Persistence(err.to_string()))?;
        self.storage.save(STORAGE_KEY, &raw)
    }
}
