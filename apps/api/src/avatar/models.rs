use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of a streaming avatar session as driven by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Created,
    Started,
    Active,
    Ended,
}

/// What the browser needs to join the avatar's real-time media room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    pub session_id: String,
    pub livekit_url: String,
    pub access_token: String,
    pub state: SessionState,
}

/// How the avatar treats the text of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    /// Speak the text verbatim.
    #[default]
    Repeat,
    /// Let the vendor's own model answer the text.
    Talk,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAck {
    pub task_id: String,
    pub state: SessionState,
    pub response: Value,
}

/// A session as reported by the vendor's list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSession {
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_interactive: Option<bool>,
}

/// Client-facing summary of a vendor session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub status: Option<String>,
    pub created_at: Option<Value>,
    pub avatar_id: Option<String>,
    pub avatar_name: Option<String>,
    pub quality: Option<String>,
    pub is_interactive: Option<bool>,
}

impl From<&VendorSession> for SessionSummary {
    fn from(s: &VendorSession) -> Self {
        Self {
            session_id: s.session_id.clone(),
            status: s.status.clone(),
            created_at: s.created_at.clone(),
            avatar_id: s.avatar_id.clone(),
            avatar_name: s.avatar_name.clone(),
            quality: s.quality.clone(),
            is_interactive: s.is_interactive,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionList {
    pub count: usize,
    pub sessions: Vec<SessionSummary>,
    pub raw: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLookup {
    pub session: VendorSession,
    pub all_sessions: Vec<VendorSession>,
}

/// Where an avatar list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarSource {
    /// Built-in list; no API key or the vendor call failed.
    Fallback,
    /// Vendor reachable but reported no interactive avatars.
    FallbackWithApi,
    StreamingApi,
    Api,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarCatalog {
    pub total_avatars: usize,
    pub interactive_avatars: Vec<Value>,
    pub all_avatars: Vec<Value>,
    pub source: AvatarSource,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCatalog {
    pub voices: Vec<Value>,
    pub japanese_voices: Vec<Value>,
    pub total: usize,
}
