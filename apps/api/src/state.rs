use std::sync::Arc;

use crate::config::Config;
use crate::generation::client::CvGenerator;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable generation backend. Default: Gemini through `LlmCvGenerator`.
    pub generator: Arc<dyn CvGenerator>,
    pub config: Config,
}
