use crate::config::Config;
use crate::salary::report::SalaryEstimator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Table model, optionally enriched by the external wage source.
    pub estimator: SalaryEstimator,
}
