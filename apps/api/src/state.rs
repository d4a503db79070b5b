use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only: requests never share mutable data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extractor + comparator pipeline. Immutable after startup.
    pub analyzer: Arc<ResumeAnalyzer>,
}
