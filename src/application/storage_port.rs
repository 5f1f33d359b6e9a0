// Port for durable key-value storage
use crate::error::DashboardError;

/// Durable key-value storage used by the request history.
///
/// `load` of a key that was never saved returns `Ok(None)`. Values are
/// stored verbatim and read back unchanged.
pub trait StoragePort: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, DashboardError>;

    fn save(&self, key: &str, value: &str) -> Result<(), DashboardError>;
}
