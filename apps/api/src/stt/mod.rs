//! Speech-to-text relay over the Whisper transcription API.

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub mod handlers;

const TRANSCRIPTION_MODEL: &str = "whisper-1";
const AUDIO_FILE_NAME: &str = "audio.webm";
const AUDIO_MIME: &str = "audio/webm";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum SttError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Clone)]
pub struct SttClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SttClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Transcribes a WebM audio clip. `language` is an ISO-639-1 code.
    pub async fn transcribe(&self, audio: Bytes, language: &str) -> Result<String, SttError> {
        let size = audio.len();
        let file = Part::bytes(audio.to_vec())
            .file_name(AUDIO_FILE_NAME)
            .mime_str(AUDIO_MIME)?;

        let form = Form::new()
            .part("file", file)
            .text("model", TRANSCRIPTION_MODEL)
            .text("language", language.to_string())
            .text("response_format", "json");

        debug!("Sending {size} bytes of audio for transcription (language={language})");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SttError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let transcription: TranscriptionResponse = response.json().await?;
        Ok(transcription.text)
    }
}

/// Maps browser locale tags to the language codes the transcription API takes.
pub fn normalize_language(lang: &str) -> &str {
    match lang {
        "ja-JP" => "ja",
        other => other,
    }
}
