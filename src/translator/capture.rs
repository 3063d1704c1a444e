//! Speech capture
//!
//! Produces one utterance of text per invocation in the speaking party's
//! configured language. An empty or whitespace-only transcript is a capture
//! failure, never an empty success.

use async_trait::async_trait;

use crate::{Error, Result};

/// Produces one transcript per invocation
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize one utterance in the given language
    ///
    /// # Errors
    ///
    /// Returns error when no speech is detected or recognition fails.
    async fn recognize(&self, audio: &[u8], lang_code: &str) -> Result<String>;
}

/// Response from a Whisper-style transcription API
#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Recognizer backed by a remote Whisper-style transcription endpoint
pub struct RemoteRecognizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl RemoteRecognizer {
    /// Create a new remote recognizer
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_endpoint(
            api_key,
            model,
            "https://api.openai.com/v1/audio/transcriptions".to_string(),
        )
    }

    /// Create a recognizer against a custom endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn with_endpoint(api_key: String, model: String, endpoint: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "API key required for speech recognition".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            endpoint,
        })
    }
}

#[async_trait]
impl SpeechRecognizer for RemoteRecognizer {
    async fn recognize(&self, audio: &[u8], lang_code: &str) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), lang = %lang_code, "starting transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("utterance.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Recognition(e.to_string()))?,
            )
            .text("model", self.model.clone())
            .text("language", lang_code.to_string());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "transcription request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "transcription API error");
            return Err(Error::Recognition(format!(
                "transcription API error {status}: {body}"
            )));
        }

        let result: TranscriptionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse transcription response");
            e
        })?;

        let transcript = ensure_speech(&result.text)?;
        tracing::info!(transcript = %transcript, "transcription complete");
        Ok(transcript)
    }
}

/// Reject empty or whitespace-only transcripts
///
/// # Errors
///
/// Returns a recognition error when the transcript carries no speech.
pub fn ensure_speech(transcript: &str) -> Result<String> {
    let trimmed = transcript.trim();
    if trimmed.is_empty() {
        return Err(Error::Recognition("no speech detected".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript_is_a_failure() {
        assert!(ensure_speech("").is_err());
        assert!(ensure_speech("   ").is_err());
        assert!(ensure_speech("\n\t").is_err());
    }

    #[test]
    fn test_transcript_is_trimmed() {
        let text = ensure_speech("  How are you feeling today?  ").unwrap();
        assert_eq!(text, "How are you feeling today?");
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = RemoteRecognizer::new(String::new(), "whisper-1".to_string());
        assert!(result.is_err());
    }
}
