//! Speech synthesis
//!
//! Speaks translated text in the listener's language. Voice selection walks
//! an explicit ordered list of predicates over the available-voice catalog;
//! the order is a tested contract.

use async_trait::async_trait;

use super::languages;
use crate::{Error, Result};

/// A synthesis voice advertised by the playback environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Voice name, e.g. "Google हिन्दी"
    pub name: String,
    /// BCP-47 locale tag, e.g. "hi-IN"
    pub lang: String,
    /// Whether the environment marks this as its default voice
    pub default: bool,
}

impl Voice {
    /// Convenience constructor for catalog entries
    #[must_use]
    pub fn new(name: &str, lang: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            lang: lang.to_string(),
            default,
        }
    }
}

/// Select a voice for a two-letter language code
///
/// The fallback chain, first match wins:
/// 1. exact locale-tag match (case-insensitive)
/// 2. locale prefix match on the code
/// 3. substring match on the code
/// 4. shared hi-IN voice, for Indic languages without dedicated voices
/// 5. the catalog's default voice
/// 6. the first available voice
///
/// Returns `None` only when the catalog is empty.
#[must_use]
pub fn select_voice<'a>(voices: &'a [Voice], code: &str) -> Option<&'a Voice> {
    let tag = languages::locale_tag(code).to_lowercase();
    let code = code.to_lowercase();

    let chain: [&dyn Fn(&Voice) -> bool; 5] = [
        &|v: &Voice| v.lang.to_lowercase() == tag,
        &|v: &Voice| v.lang.to_lowercase().starts_with(&code),
        &|v: &Voice| v.lang.to_lowercase().contains(&code),
        &|v: &Voice| {
            languages::INDIC_SHARED_VOICE.contains(&code.as_str())
                && v.lang.to_lowercase().contains("hi-in")
        },
        &|v: &Voice| v.default,
    ];

    chain
        .iter()
        .find_map(|matches| voices.iter().find(|&v| matches(v)))
        .or_else(|| voices.first())
}

/// Speaks text aloud in a target locale
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize and play text with the given voice and locale tag
    ///
    /// Implementations resolve when playback ends; errors are logged by the
    /// orchestrator and never abort the cycle.
    ///
    /// # Errors
    ///
    /// Returns error when synthesis fails.
    async fn speak(&self, text: &str, locale_tag: &str, voice_name: &str) -> Result<()>;
}

/// Request body for a remote TTS endpoint
#[derive(serde::Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
}

/// Synthesizer backed by a remote TTS endpoint
pub struct RemoteSynthesizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    speed: f32,
}

impl RemoteSynthesizer {
    /// Create a new remote synthesizer
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String, speed: f32) -> Result<Self> {
        Self::with_endpoint(
            api_key,
            model,
            speed,
            "https://api.openai.com/v1/audio/speech".to_string(),
        )
    }

    /// Create a synthesizer against a custom endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn with_endpoint(api_key: String, model: String, speed: f32, endpoint: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("API key required for synthesis".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            endpoint,
            speed,
        })
    }

    /// Synthesize text to speech
    ///
    /// # Returns
    ///
    /// Audio bytes (MP3 format)
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let request = SpeechRequest {
            model: &self.model,
            input: text,
            voice,
            speed: self.speed,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!("TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        tracing::debug!(audio_bytes = audio.len(), "synthesis complete");
        Ok(audio.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for RemoteSynthesizer {
    async fn speak(&self, text: &str, locale_tag: &str, voice_name: &str) -> Result<()> {
        tracing::debug!(voice = %voice_name, locale = %locale_tag, "synthesizing speech");
        self.synthesize(text, voice_name).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("Default English", "en-US", true),
            Voice::new("Hindi India", "hi-IN", false),
            Voice::new("Spanish Spain", "es-ES", false),
            Voice::new("Tamil Wrapped", "x-ta-wrapped", false),
        ]
    }

    #[test]
    fn test_exact_locale_match_wins() {
        let voices = catalog();
        let voice = select_voice(&voices, "hi").unwrap();
        assert_eq!(voice.name, "Hindi India");
    }

    #[test]
    fn test_prefix_beats_substring_and_default() {
        let voices = vec![
            Voice::new("Default", "en-US", true),
            Voice::new("Substring Match", "x-ta-wrapped", false),
            Voice::new("Prefix Match", "ta-LK", false),
        ];
        // No exact ta-IN voice; the ta-LK prefix match must win over both the
        // substring match and the default voice
        let voice = select_voice(&voices, "ta").unwrap();
        assert_eq!(voice.name, "Prefix Match");
    }

    #[test]
    fn test_substring_match_before_default() {
        let voices = catalog();
        let voice = select_voice(&voices, "ta").unwrap();
        assert_eq!(voice.name, "Tamil Wrapped");
    }

    #[test]
    fn test_indic_fallback_to_shared_hindi_voice() {
        let voices = vec![
            Voice::new("Default English", "en-US", true),
            Voice::new("Hindi India", "hi-IN", false),
        ];
        // Bengali has no voice in this catalog; it shares the hi-IN voice
        let voice = select_voice(&voices, "bn").unwrap();
        assert_eq!(voice.name, "Hindi India");
    }

    #[test]
    fn test_non_indic_falls_through_to_default() {
        let voices = vec![
            Voice::new("Default English", "en-US", true),
            Voice::new("Hindi India", "hi-IN", false),
        ];
        let voice = select_voice(&voices, "ko").unwrap();
        assert_eq!(voice.name, "Default English");
    }

    #[test]
    fn test_first_voice_when_no_default() {
        let voices = vec![
            Voice::new("First", "fr-FR", false),
            Voice::new("Second", "de-DE", false),
        ];
        let voice = select_voice(&voices, "ko").unwrap();
        assert_eq!(voice.name, "First");
    }

    #[test]
    fn test_empty_catalog_selects_nothing() {
        assert!(select_voice(&[], "hi").is_none());
    }
}
