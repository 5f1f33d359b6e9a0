// Sensor data domain models
use serde::{Deserialize, Serialize};

/// One aggregated reading for a time period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub date: String,
    pub period: String,
    pub energy_total: f64,
}

/// Payload returned for one sensor data query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub sensor: String,
    #[serde(default)]
    pub data: Vec<EnergyReading>,
    /// Server-measured execution time in milliseconds.
    #[serde(default)]
    pub execution_time: f64,
}

/// Lifecycle of the current query, as observed by the presentation layer.
///
/// Replaced wholesale on every completion; there is no merging between
/// consecutive runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Success(SensorData),
    Failure(String),
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserializes_server_response() {
        let raw = r#"{
            "sensor": "sensor_001",
            "data": [
                {"date": "2024-05-01", "period": "00", "energy_total": 1.5},
                {"date": "2024-05-01", "period": "01", "energy_total": 2.1}
            ],
            "execution_time": 42.0
        }"#;

        let payload: SensorData = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.sensor, "sensor_001");
        assert_eq!(payload.data.len(), 2);
        assert_eq!(payload.data[0].period, "00");
        assert_eq!(payload.execution_time, 42.0);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let payload: SensorData = serde_json::from_str(r#"{"sensor": "s1"}"#).unwrap();
        assert!(payload.data.is_empty());
        assert_eq!(payload.execution_time, 0.0);
    }
}
