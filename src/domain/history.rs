// Bounded request history domain models
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of records the history keeps.
pub const HISTORY_CAPACITY: usize = 50;

/// One completed, successful request.
///
/// Serde field names match the persisted format, so a log written by an
/// earlier session reads back with the same fields and ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub id: String,
    pub sensor: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    /// Server-measured execution time in milliseconds.
    pub execution_time: f64,
}

impl RequestRecord {
    pub fn new(sensor: &str, data_type: &str, execution_time: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sensor: sensor.to_string(),
            data_type: data_type.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            execution_time,
        }
    }
}

/// Insertion-ordered request log, newest first, bounded at
/// [`HISTORY_CAPACITY`].
///
/// Mutations return a new value, so the capacity invariant holds at every
/// observable point and persistence always sees a whole log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestLog(Vec<RequestRecord>);

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from persisted records, truncating anything beyond
    /// capacity.
    pub fn from_records(mut records: Vec<RequestRecord>) -> Self {
        records.truncate(HISTORY_CAPACITY);
        Self(records)
    }

    /// Prepends `record`, evicting the oldest entry when at capacity.
    pub fn with_record(&self, record: RequestRecord) -> Self {
        let mut records = Vec::with_capacity((self.0.len() + 1).min(HISTORY_CAPACITY));
        records.push(record);
        records.extend(self.0.iter().take(HISTORY_CAPACITY - 1).cloned());
        Self(records)
    }

    pub fn cleared() -> Self {
        Self::default()
    }

    /// Records newest first.
    pub fn records(&self) -> &[RequestRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sensor: &str) -> RequestRecord {
        RequestRecord::new(sensor, "hourly", 10.0)
    }

    #[test]
    fn test_newest_first_ordering() {
        let log = RequestLog::new()
            .with_record(record("first"))
            .with_record(record("second"))
            .with_record(record("third"));

        let sensors: Vec<&str> = log.records().iter().map(|r| r.sensor.as_str()).collect();
        assert_eq!(sensors, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = RequestLog::new();
        for i in 0..HISTORY_CAPACITY {
            log = log.with_record(record(&format!("sensor_{i}")));
        }
        assert_eq!(log.len(), HISTORY_CAPACITY);
        // sensor_0 is the oldest, sitting at the back of the log.
        assert_eq!(log.records().last().unwrap().sensor, "sensor_0");

        let log = log.with_record(record("overflow"));
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.records().first().unwrap().sensor, "overflow");
        assert!(log.records().iter().all(|r| r.sensor != "sensor_0"));
        assert_eq!(log.records().last().unwrap().sensor, "sensor_1");
    }

    #[test]
    fn test_cleared_is_empty() {
        let log = RequestLog::new().with_record(record("a"));
        assert!(!log.is_empty());
        assert!(RequestLog::cleared().is_empty());
    }

    #[test]
    fn test_from_records_truncates() {
        let records: Vec<RequestRecord> = (0..HISTORY_CAPACITY + 5)
            .map(|i| record(&format!("sensor_{i}")))
            .collect();
        let log = RequestLog::from_records(records);
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.records().first().unwrap().sensor, "sensor_0");
    }

    #[test]
    fn test_round_trips_persisted_field_names() {
        let log = RequestLog::new().with_record(RequestRecord::new("temp-1", "hourly", 42.0));
        let raw = serde_json::to_string(&log).unwrap();
        assert!(raw.contains("\"dataType\":\"hourly\""));
        assert!(raw.contains("\"execution_time\":42.0"));

        let restored: RequestLog = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, log);
    }
}
