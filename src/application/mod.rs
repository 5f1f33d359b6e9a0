// Application layer - Ports and coordination services
pub mod query_coordinator;
pub mod remote_port;
pub mod request_history;
pub mod result_store;
pub mod selection_state;
pub mod sensor_catalog;
pub mod storage_port;
