//! Axum route handlers for the Speech-to-Text API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;
use crate::stt::normalize_language;

const DEFAULT_LANGUAGE: &str = "ja";
/// Whisper does not report confidence; clients get a fixed value.
const FIXED_CONFIDENCE: f32 = 0.95;

#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub text: String,
    pub confidence: f32,
}

/// POST /api/v1/stt/recognize
///
/// Multipart fields: `audio` (required, WebM clip) and `lang` (optional, default `ja`).
pub async fn handle_recognize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RecognizeResponse>, AppError> {
    let mut audio: Option<Bytes> = None;
    let mut lang: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable audio field: {e}")))?;
                audio = Some(data);
            }
            "lang" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable lang field: {e}")))?;
                lang = Some(value);
            }
            _ => {}
        }
    }

    let audio = audio
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::Validation("Audio file is required".to_string()))?;

    let lang = lang
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let language = normalize_language(&lang);

    info!("Recognizing {} bytes of audio ({language})", audio.len());
    let text = state.stt.transcribe(audio, language).await?;

    Ok(Json(RecognizeResponse {
        text,
        confidence: FIXED_CONFIDENCE,
    }))
}
