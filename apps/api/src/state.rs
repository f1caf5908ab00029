use std::sync::Arc;

use crate::analysis::AnalysisService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analysis: Arc<AnalysisService>,
    /// Loaded once at start-up; read-only afterwards.
    pub config: Config,
}
