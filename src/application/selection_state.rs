// Current sensor and data type selection
use std::sync::Mutex;

use crate::domain::selection::{DataType, QueryKey};

/// The operator's current sensor and data type choice.
///
/// Changing a value never triggers a fetch; running a query is a separate
/// explicit command handled by the coordinator. Written by user
/// interaction, read by the coordinator.
#[derive(Debug, Default)]
pub struct SelectionState {
    inner: Mutex<Selection>,
}

#[derive(Debug, Clone, Default)]
struct Selection {
    sensor: Option<String>,
    data_type: Option<DataType>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sensor(&self, sensor: impl Into<String>) {
        self.inner.lock().unwrap().sensor = Some(sensor.into());
    }

    pub fn set_data_type(&self, data_type: DataType) {
        self.inner.lock().unwrap().data_type = Some(data_type);
    }

    /// Clears both halves of the selection.
    pub fn reset(&self) {
        *self.inner.lock().unwrap() = Selection::default();
    }

    pub fn sensor(&self) -> Option<String> {
        self.inner.lock().unwrap().sensor.clone()
    }

    pub fn data_type(&self) -> Option<DataType> {
        self.inner.lock().unwrap().data_type
    }

    /// Key for the current selection, if both halves are chosen and the
    /// sensor is non-empty.
    pub fn query_key(&self) -> Option<QueryKey> {
        let current = self.inner.lock().unwrap().clone();
        match (current.sensor, current.data_type) {
            (Some(sensor), Some(data_type)) if !sensor.trim().is_empty() => {
                Some(QueryKey::new(sensor, data_type))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_requires_both_halves() {
        let state = SelectionState::new();
        assert_eq!(state.query_key(), None);

        state.set_sensor("sensor_001");
        assert_eq!(state.query_key(), None);

        state.set_data_type(DataType::Hourly);
        assert_eq!(
            state.query_key(),
            Some(QueryKey::new("sensor_001", DataType::Hourly))
        );
    }

    #[test]
    fn test_empty_sensor_yields_no_key() {
        let state = SelectionState::new();
        state.set_sensor("");
        state.set_data_type(DataType::Raw);
        assert_eq!(state.query_key(), None);
    }

    #[test]
    fn test_reset_clears_selection() {
        let state = SelectionState::new();
        state.set_sensor("sensor_001");
        state.set_data_type(DataType::Cached);
        state.reset();
        assert_eq!(state.sensor(), None);
        assert_eq!(state.data_type(), None);
        assert_eq!(state.query_key(), None);
    }
}
