//! Agent Orchestrator: one conversation turn of the career agent.
//!
//! Protocol per turn:
//! 1. First pass with the `search_jobs` tool available (`tool_choice = auto`).
//! 2. If the model calls the tool, run the matcher synchronously and append the
//!    results as `tool` messages, plus presentation instructions.
//! 3. Second pass without tools; its text replaces the first-pass text.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent::prompts::{CAREER_AGENT_SYSTEM, SEARCH_RESULTS_PRESENTATION};
use crate::agent::tools::{parse_search_args, search_jobs_tool, SEARCH_JOBS};
use crate::errors::AppError;
use crate::jobs::matcher::JobMatcher;
use crate::jobs::models::{SearchQuery, SearchResults};
use crate::llm_client::{ChatMessage, ChatModel, CompletionRequest, Role};

const TEMPERATURE: f32 = 0.7;
const FIRST_PASS_MAX_TOKENS: u32 = 1000;
const SECOND_PASS_MAX_TOKENS: u32 = 800;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Roles a client may replay in the conversation history. Tool messages are
/// produced server-side only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    System,
}

/// A prior turn of the conversation, as held by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => Role::User,
            TurnRole::Assistant => Role::Assistant,
            TurnRole::System => Role::System,
        };
        ChatMessage::text(role, turn.content.clone())
    }
}

/// Record of one `search_jobs` invocation made during the turn.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInvocation {
    pub name: String,
    pub args: SearchQuery,
    pub results: SearchResults,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub turn_id: Uuid,
    pub text: String,
    pub tool_calls: Vec<ToolInvocation>,
    /// Results of the last search in this turn, if any.
    pub data: Option<SearchResults>,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

pub async fn respond(
    model: &dyn ChatModel,
    matcher: &JobMatcher,
    input: &str,
    history: &[ConversationTurn],
) -> Result<AgentReply, AppError> {
    if input.trim().is_empty() {
        return Err(AppError::Validation("input is required".to_string()));
    }

    let turn_id = Uuid::new_v4();
    info!(%turn_id, history_len = history.len(), "Agent turn started");

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(CAREER_AGENT_SYSTEM));
    messages.extend(history.iter().map(ChatMessage::from));
    messages.push(ChatMessage::user(input));

    let first = model
        .complete(&CompletionRequest {
            messages: messages.clone(),
            tools: vec![search_jobs_tool()],
            temperature: TEMPERATURE,
            max_tokens: FIRST_PASS_MAX_TOKENS,
        })
        .await
        .map_err(|e| AppError::Llm(format!("First completion pass failed: {e}")))?;

    let mut text = first.content.clone().unwrap_or_default();

    if first.tool_calls.is_empty() {
        info!(%turn_id, "Agent turn finished without tool calls");
        return Ok(AgentReply {
            turn_id,
            text,
            tool_calls: Vec::new(),
            data: None,
        });
    }

    let mut invocations = Vec::new();
    let mut tool_messages = Vec::with_capacity(first.tool_calls.len());

    for call in &first.tool_calls {
        if call.function.name != SEARCH_JOBS {
            warn!(%turn_id, tool = %call.function.name, "Model called an unknown tool");
            tool_messages.push(ChatMessage::tool_result(
                call.id.clone(),
                json!({ "error": format!("unknown tool {}", call.function.name) }).to_string(),
            ));
            continue;
        }

        let args = parse_search_args(call).map_err(|e| {
            AppError::Llm(format!("Invalid {SEARCH_JOBS} arguments from model: {e}"))
        })?;
        let results = matcher.search(&args);
        info!(%turn_id, ?args, hits = results.items.len(), "search_jobs executed");

        let payload = serde_json::to_string(&results)
            .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
        tool_messages.push(ChatMessage::tool_result(call.id.clone(), payload));

        invocations.push(ToolInvocation {
            name: SEARCH_JOBS.to_string(),
            args,
            results,
        });
    }

    if !invocations.is_empty() {
        let mut follow_up = messages;
        follow_up.push(first);
        follow_up.extend(tool_messages);
        follow_up.push(ChatMessage::system(SEARCH_RESULTS_PRESENTATION));

        let second = model
            .complete(&CompletionRequest {
                messages: follow_up,
                tools: Vec::new(),
                temperature: TEMPERATURE,
                max_tokens: SECOND_PASS_MAX_TOKENS,
            })
            .await
            .map_err(|e| AppError::Llm(format!("Second completion pass failed: {e}")))?;

        text = second.content.unwrap_or_default();
    }

    let data = invocations.last().map(|i| i.results.clone());
    info!(%turn_id, tool_calls = invocations.len(), "Agent turn finished");

    Ok(AgentReply {
        turn_id,
        text,
        tool_calls: invocations,
        data,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
