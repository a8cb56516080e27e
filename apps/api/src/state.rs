use std::sync::Arc;

use crate::config::Config;
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Vocabulary plus the injected language model. Runs on the blocking pool.
    pub skills: Arc<SkillExtractor>,
}
