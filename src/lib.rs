// Client-side query and state coordination for the sensor dashboard.
//
// The crate owns the current sensor/data-type selection, the lifecycle
// of in-flight fetches (single-flight per key, manual trigger, staleness
// guard), the currently displayed result, and a bounded durable history
// of completed requests. Rendering is the embedding application's job.
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod session;

pub use error::DashboardError;
pub use session::DashboardSession;
