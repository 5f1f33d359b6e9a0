// Error taxonomy for the coordination layer
use thiserror::Error;

/// Errors surfaced by the query coordination layer.
///
/// `Validation` is raised before any remote call and is never retried.
/// `Remote` covers network errors, timeouts and non-2xx responses after
/// the retry budget is spent. `Persistence` is logged by the coordinator
/// and never reported as a fetch failure.
///
/// The type is `Clone` so the outcome of a shared in-flight fetch can be
/// handed to every caller that joined it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("invalid selection: {0}")]
    Validation(String),

    #[error("remote request failed: {0}")]
    Remote(String),

    #[error("persistence failed: {0}")]
    Persistence(String),
}
