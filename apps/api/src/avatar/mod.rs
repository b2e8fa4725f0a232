/// Avatar bridge: request/response facade over the HeyGen streaming-avatar API.
///
/// The media itself flows browser <-> vendor over LiveKit; this service only
/// drives the session lifecycle (create → start → speak) and lists what exists.
use anyhow::Context;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod handlers;
pub mod models;

use models::{
    AvatarCatalog, AvatarSource, SessionCredentials, SessionList, SessionLookup, SessionState,
    SessionSummary, TaskAck, TaskMode, VendorSession, VoiceCatalog,
};

const NEW_SESSION_PATH: &str = "/v1/streaming.new";
const START_SESSION_PATH: &str = "/v1/streaming.start";
const TASK_PATH: &str = "/v1/streaming.task";
const LIST_SESSIONS_PATH: &str = "/v1/streaming.list";
const STREAMING_AVATARS_PATH: &str = "/v2/avatars?is_streaming=true";
const AVATARS_PATH: &str = "/v2/avatars";
const VOICES_PATH: &str = "/v2/voices";

const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Placeholder avatar id meaning "let the vendor pick".
const DEFAULT_AVATAR: &str = "default";

/// Interactive avatars known to work with the streaming API, used when the
/// vendor cannot be asked.
const KNOWN_INTERACTIVE_AVATARS: &[(&str, &str)] = &[
    ("Kristin_public_3_20240108", "Kristin"),
    ("Anna_public_3_20240108", "Anna"),
    ("Susan_public_2_20240328", "Susan"),
    ("Wayne_20240711", "Wayne"),
    ("josh_lite3_20230714", "Josh"),
];

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("HeyGen API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct NewSessionEnvelope {
    data: NewSessionData,
}

#[derive(Debug, Deserialize)]
struct NewSessionData {
    session_id: String,
    url: String,
    access_token: String,
}

#[derive(Clone)]
pub struct AvatarClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AvatarClient {
    pub fn new(api_key: Option<String>, base_url: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, AvatarError> {
        let key = self.api_key.as_deref().ok_or(AvatarError::NotConfigured)?;
        Ok(builder.header("X-Api-Key", key))
    }

    async fn get(&self, path: &str, default_error: &str) -> Result<Value, AvatarError> {
        let request = self.authorized(self.client.get(format!("{}{path}", self.base_url)))?;
        send(request, default_error).await
    }

    async fn post(&self, path: &str, body: &Value, default_error: &str) -> Result<Value, AvatarError> {
        let request = self
            .authorized(self.client.post(format!("{}{path}", self.base_url)))?
            .json(body);
        send(request, default_error).await
    }

    /// Creates a new streaming session and returns its media-room credentials.
    pub async fn create_session(
        &self,
        avatar_id: Option<&str>,
    ) -> Result<SessionCredentials, AvatarError> {
        let body = new_session_body(avatar_id);
        debug!("HeyGen new session request: {body}");

        let value = self
            .post(NEW_SESSION_PATH, &body, "Failed to create HeyGen session")
            .await?;
        let envelope: NewSessionEnvelope = serde_json::from_value(value)?;

        info!("HeyGen session created: {}", envelope.data.session_id);
        Ok(SessionCredentials {
            session_id: envelope.data.session_id,
            livekit_url: envelope.data.url,
            access_token: envelope.data.access_token,
            state: SessionState::Created,
        })
    }

    pub async fn start_session(&self, session_id: &str) -> Result<Value, AvatarError> {
        let body = json!({ "session_id": session_id });
        let data = self
            .post(START_SESSION_PATH, &body, "Failed to start HeyGen session")
            .await?;
        info!("HeyGen session started: {session_id}");
        Ok(data)
    }

    /// Pushes text for the avatar to speak.
    pub async fn send_task(
        &self,
        session_id: &str,
        text: &str,
        mode: TaskMode,
    ) -> Result<TaskAck, AvatarError> {
        let body = json!({
            "session_id": session_id,
            "text": text,
            "task_type": mode,
        });
        debug!("Sending task to HeyGen session {session_id} ({} chars)", text.chars().count());

        let response = self
            .post(TASK_PATH, &body, "Failed to send task to HeyGen")
            .await?;

        let task_id = response
            .pointer("/data/task_id")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        Ok(TaskAck {
            task_id,
            state: SessionState::Active,
            response,
        })
    }

    pub async fn list_sessions(&self) -> Result<SessionList, AvatarError> {
        let raw = self
            .get(LIST_SESSIONS_PATH, "Failed to get session list")
            .await?;
        let sessions = parse_sessions(&raw)?;

        Ok(SessionList {
            count: sessions.len(),
            sessions: sessions.iter().map(SessionSummary::from).collect(),
            raw,
        })
    }

    /// Looks a session up by scanning the list; the vendor has no working
    /// per-session endpoint.
    pub async fn find_session(&self, session_id: &str) -> Result<Option<SessionLookup>, AvatarError> {
        let raw = self
            .get(LIST_SESSIONS_PATH, "Failed to get session info")
            .await?;
        let sessions = parse_sessions(&raw)?;

        let Some(session) = sessions.iter().find(|s| s.session_id == session_id).cloned() else {
            return Ok(None);
        };

        Ok(Some(SessionLookup {
            session,
            all_sessions: sessions,
        }))
    }

    /// Lists interactive avatars, degrading to the built-in list whenever the
    /// vendor cannot provide one.
    pub async fn list_avatars(&self) -> Result<AvatarCatalog, AvatarError> {
        if !self.is_configured() {
            return Ok(fallback_avatars(AvatarSource::Fallback));
        }

        match self.get(STREAMING_AVATARS_PATH, "Streaming avatars unavailable").await {
            Ok(value) => {
                let avatars = extract_list(&value, "avatars");
                if !avatars.is_empty() {
                    return Ok(AvatarCatalog {
                        total_avatars: avatars.len(),
                        interactive_avatars: avatars.clone(),
                        all_avatars: avatars,
                        source: AvatarSource::StreamingApi,
                    });
                }
            }
            Err(e) => warn!("Streaming avatars endpoint unavailable, trying general endpoint: {e}"),
        }

        let value = match self.get(AVATARS_PATH, "Failed to list avatars").await {
            Ok(value) => value,
            Err(AvatarError::Api { status, message }) => {
                warn!("HeyGen avatars API returned {status}, using fallback avatars: {message}");
                return Ok(fallback_avatars(AvatarSource::Fallback));
            }
            Err(e) => return Err(e),
        };

        let avatars = extract_list(&value, "avatars");
        let interactive: Vec<Value> = avatars.iter().filter(|a| is_interactive(a)).cloned().collect();

        if interactive.is_empty() {
            return Ok(fallback_avatars(AvatarSource::FallbackWithApi));
        }

        Ok(AvatarCatalog {
            total_avatars: avatars.len(),
            interactive_avatars: interactive.clone(),
            all_avatars: interactive,
            source: AvatarSource::Api,
        })
    }

    pub async fn list_voices(&self) -> Result<VoiceCatalog, AvatarError> {
        let value = self.get(VOICES_PATH, "Failed to fetch voices").await?;
        let voices = extract_list(&value, "voices");
        let japanese_voices = voices.iter().filter(|v| is_japanese_voice(v)).cloned().collect();

        Ok(VoiceCatalog {
            total: voices.len(),
            japanese_voices,
            voices,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn send(request: RequestBuilder, default_error: &str) -> Result<Value, AvatarError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("HeyGen API returned {status}: {body}");
        return Err(AvatarError::Api {
            status: status.as_u16(),
            message: vendor_error_message(&body, default_error),
        });
    }

    Ok(response.json().await?)
}

/// Uses the vendor's JSON `message`, else the raw body, else `default`.
fn vendor_error_message(body: &str, default: &str) -> String {
    if let Some(message) = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
    {
        return message;
    }
    if body.trim().is_empty() {
        default.to_string()
    } else {
        body.to_string()
    }
}

fn new_session_body(avatar_id: Option<&str>) -> Value {
    let mut body = json!({
        "quality": "high",
        "voice": { "rate": 1.0 },
        "version": "v2",
    });
    if let Some(id) = avatar_id.filter(|id| !id.is_empty() && *id != DEFAULT_AVATAR) {
        body["avatar_id"] = json!(id);
    }
    body
}

/// Reads `data.<key>` or a top-level `<key>` array, defaulting to empty.
fn extract_list(value: &Value, key: &str) -> Vec<Value> {
    value
        .get("data")
        .and_then(|d| d.get(key))
        .or_else(|| value.get(key))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn parse_sessions(raw: &Value) -> Result<Vec<VendorSession>, AvatarError> {
    match raw.get("data") {
        Some(data) if data.is_array() => Ok(serde_json::from_value(data.clone())?),
        _ => Ok(Vec::new()),
    }
}

fn is_interactive(avatar: &Value) -> bool {
    let flag = |key: &str| avatar.get(key).and_then(Value::as_bool).unwrap_or(false);
    flag("is_interactive")
        || flag("is_streaming")
        || avatar.get("type").and_then(Value::as_str) == Some("interactive")
        || avatar
            .get("capabilities")
            .and_then(Value::as_array)
            .map(|caps| caps.iter().any(|c| c.as_str() == Some("streaming")))
            .unwrap_or(false)
}

fn is_japanese_voice(voice: &Value) -> bool {
    voice
        .get("language")
        .and_then(Value::as_str)
        .map(|lang| {
            let lang = lang.to_lowercase();
            lang.contains("japanese") || lang.contains("ja")
        })
        .unwrap_or(false)
}

fn fallback_avatars(source: AvatarSource) -> AvatarCatalog {
    let avatars: Vec<Value> = KNOWN_INTERACTIVE_AVATARS
        .iter()
        .map(|(id, name)| json!({ "avatar_id": id, "name": name, "is_interactive": true }))
        .collect();

    AvatarCatalog {
        total_avatars: avatars.len(),
        interactive_avatars: avatars.clone(),
        all_avatars: avatars,
        source,
    }
}
