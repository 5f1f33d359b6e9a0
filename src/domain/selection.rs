// Sensor selection domain models
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Backend source a sensor data query reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Raw,
    Hourly,
    Cached,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Raw => "raw",
            DataType::Hourly => "hourly",
            DataType::Cached => "cached",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical, dedupable query: a sensor paired with a data type.
///
/// Keys compare by value; two `run` calls with equal keys share a single
/// in-flight remote call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub sensor: String,
    pub data_type: DataType,
}

impl QueryKey {
    pub fn new(sensor: impl Into<String>, data_type: DataType) -> Self {
        Self {
            sensor: sensor.into(),
            data_type,
        }
    }

    /// A key with an empty sensor never reaches the remote port.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.sensor.trim().is_empty() {
            return Err(DashboardError::Validation(
                "a sensor must be selected before running a query".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sensor, self.data_type)
    }
}
