//! Axum route handlers for the Avatar API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::avatar::models::{
    AvatarCatalog, SessionCredentials, SessionList, SessionLookup, SessionState, TaskAck,
    TaskMode, VoiceCatalog,
};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub avatar_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mode: TaskMode,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub ok: bool,
    pub state: SessionState,
    pub data: Value,
}

/// POST /api/v1/avatar/session
pub async fn handle_create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<SessionCredentials>, AppError> {
    let credentials = state.avatar.create_session(req.avatar_id.as_deref()).await?;
    Ok(Json(credentials))
}

/// POST /api/v1/avatar/start
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<StartSessionResponse>, AppError> {
    if req.session_id.is_empty() {
        return Err(AppError::Validation("Session ID is required".to_string()));
    }

    let data = state.avatar.start_session(&req.session_id).await?;
    Ok(Json(StartSessionResponse {
        ok: true,
        state: SessionState::Started,
        data,
    }))
}

/// POST /api/v1/avatar/task
pub async fn handle_send_task(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<TaskAck>, AppError> {
    if req.session_id.is_empty() || req.text.is_empty() {
        return Err(AppError::Validation(
            "Session ID and text are required".to_string(),
        ));
    }

    let ack = state
        .avatar
        .send_task(&req.session_id, &req.text, req.mode)
        .await?;
    Ok(Json(ack))
}

/// GET /api/v1/avatar/status
pub async fn handle_list_sessions(
    State(state): State<AppState>,
) -> Result<Json<SessionList>, AppError> {
    Ok(Json(state.avatar.list_sessions().await?))
}

/// POST /api/v1/avatar/status
pub async fn handle_get_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<SessionLookup>, AppError> {
    if req.session_id.is_empty() {
        return Err(AppError::Validation("Session ID required".to_string()));
    }

    state
        .avatar
        .find_session(&req.session_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", req.session_id)))
}

/// GET /api/v1/avatar/avatars
pub async fn handle_list_avatars(
    State(state): State<AppState>,
) -> Result<Json<AvatarCatalog>, AppError> {
    Ok(Json(state.avatar.list_avatars().await?))
}

/// GET /api/v1/avatar/voices
pub async fn handle_list_voices(
    State(state): State<AppState>,
) -> Result<Json<VoiceCatalog>, AppError> {
    Ok(Json(state.avatar.list_voices().await?))
}
