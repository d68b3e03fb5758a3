use std::sync::Arc;

use crate::analysis::store::AnalysisStore;
use crate::analysis::vocabulary::SkillVocabulary;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway. Default: `PgAnalysisStore`.
    pub store: Arc<dyn AnalysisStore>,
    /// Built once at startup, never mutated.
    pub vocabulary: Arc<SkillVocabulary>,
    pub config: Config,
}
