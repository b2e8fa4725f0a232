//! Axum route handlers for the Agent API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::agent::orchestrator::{respond, AgentReply, ConversationTurn};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ConversationContext {
    #[serde(default)]
    pub messages: Vec<ConversationTurn>,
}

#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub context: ConversationContext,
}

/// POST /api/v1/llm/respond
///
/// Runs one agent turn. When the model searches for jobs, the reply carries
/// the narrated text plus the raw search results under `data`.
pub async fn handle_respond(
    State(state): State<AppState>,
    Json(request): Json<RespondRequest>,
) -> Result<Json<AgentReply>, AppError> {
    let reply = respond(
        state.llm.as_ref(),
        &state.matcher,
        &request.input,
        &request.context.messages,
    )
    .await?;

    Ok(Json(reply))
}
