// Port for the remote dashboard API
use async_trait::async_trait;

use crate::domain::selection::QueryKey;
use crate::domain::sensor_data::SensorData;
use crate::error::DashboardError;

/// Capability the coordination layer uses to reach the dashboard API.
///
/// Implementations own transport concerns (timeouts, retry budget); the
/// core only sees the final outcome.
#[async_trait]
pub trait RemoteDataPort: Send + Sync {
    /// Fetch the list of available sensor names.
    async fn fetch_sensors(&self) -> Result<Vec<String>, DashboardError>;

    /// Fetch the data for one sensor and data type.
    async fn fetch_sensor_data(&self, key: &QueryKey) -> Result<SensorData, DashboardError>;
}
