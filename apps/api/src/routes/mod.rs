pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::agent::handlers as agent;
use crate::avatar::handlers as avatar;
use crate::jobs::handlers as jobs;
use crate::state::AppState;
use crate::stt::handlers as stt;

/// Audio uploads exceed axum's 2 MB default; Whisper itself caps at 25 MB.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route("/api/v1/jobs/search", post(jobs::handle_search))
        // Agent
        .route("/api/v1/llm/respond", post(agent::handle_respond))
        // Speech-to-text
        .route(
            "/api/v1/stt/recognize",
            post(stt::handle_recognize).layer(DefaultBodyLimit::max(MAX_AUDIO_BYTES)),
        )
        // Avatar session bridge
        .route("/api/v1/avatar/session", post(avatar::handle_create_session))
        .route("/api/v1/avatar/start", post(avatar::handle_start_session))
        .route("/api/v1/avatar/task", post(avatar::handle_send_task))
        .route(
            "/api/v1/avatar/status",
            get(avatar::handle_list_sessions).post(avatar::handle_get_session),
        )
        .route("/api/v1/avatar/avatars", get(avatar::handle_list_avatars))
        .route("/api/v1/avatar/voices", get(avatar::handle_list_voices))
        .with_state(state)
}
