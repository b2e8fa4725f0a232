use std::sync::Arc;

use crate::avatar::AvatarClient;
use crate::jobs::matcher::JobMatcher;
use crate::llm_client::ChatModel;
use crate::stt::SttClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `LlmClient`.
    pub llm: Arc<dyn ChatModel>,
    /// Read-only; shared by every request without locking.
    pub matcher: Arc<JobMatcher>,
    pub stt: SttClient,
    pub avatar: AvatarClient,
}
