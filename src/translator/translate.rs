//! Translation client
//!
//! Turns source-language text into target-language text through a remote
//! chat-completion service, framed as medical translation. The Haryanvi
//! dialect has no native support in the service: its name aliases to Hindi
//! for the ordinary call, and when Haryanvi is the target a second call
//! rewrites the Hindi output into the dialect.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::languages;
use crate::{Error, Result};

/// Placeholder substituted when the translation service fails
pub const UNAVAILABLE: &str = "Translation unavailable";

/// Translates text between two named languages
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from the source language to the target language
    ///
    /// Language arguments are display names from the registry, not codes.
    ///
    /// # Errors
    ///
    /// Returns error when the underlying service call fails.
    async fn translate(&self, text: &str, target_name: &str, source_name: &str) -> Result<String>;
}

/// Chat-completion backed translation client
pub struct ChatTranslator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl ChatTranslator {
    /// Create a new translation client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        Self::with_endpoint(
            api_key,
            model,
            "https://api.openai.com/v1/chat/completions".to_string(),
        )
    }

    /// Create a client against a custom endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn with_endpoint(api_key: String, model: String, endpoint: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("API key required for translation".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            endpoint,
        })
    }

    /// Issue one chat-completion call; a single attempt, no retry
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: 1000,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Translation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Translation(format!("API error {status}: {body}")));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Translation(format!("failed to parse response: {e}")))?;

        let content = result
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string);

        content.ok_or_else(|| Error::Translation("no translation returned".to_string()))
    }
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, text: &str, target_name: &str, source_name: &str) -> Result<String> {
        // Dialect names alias to their base language for the ordinary call
        let actual_target = languages::effective_name(target_name);
        let actual_source = languages::effective_name(source_name);

        let system = translation_instruction(actual_target, actual_source);
        let translated = self.complete(&system, text).await?;
        tracing::debug!(target = %actual_target, "base translation complete");

        if !languages::is_dialect(target_name) {
            return Ok(translated);
        }

        // Second stage: rewrite the base-language output into the dialect.
        // A failed rewrite falls back to the base translation.
        match self.complete(dialect_rewrite_instruction(), &translated).await {
            Ok(rewritten) => {
                tracing::debug!("dialect rewrite complete");
                Ok(rewritten)
            }
            Err(e) => {
                tracing::warn!(error = %e, "dialect rewrite failed, keeping base translation");
                Ok(translated)
            }
        }
    }
}

/// System instruction for the ordinary translation call
#[must_use]
pub fn translation_instruction(target_name: &str, source_name: &str) -> String {
    format!(
        "You are a professional medical translator. Translate the following text \
         from {source_name} to {target_name} while maintaining the medical context \
         and being culturally appropriate. Keep the translation accurate and natural."
    )
}

/// System instruction for the Haryanvi rewrite stage
///
/// The rules are fixed: open with the greeting, swap the standard-Hindi verb
/// forms and the formal second-person pronoun, keep the tone polite and rural.
#[must_use]
pub const fn dialect_rewrite_instruction() -> &'static str {
    "Convert the following Hindi paragraph into respectful Haryanvi dialect by: \
     Starting with \"राम राम सा\" as greeting. \
     Using \"सै\" or \"से\" instead of \"है/हूँ/हैं\". \
     Replacing आप → तै, मैं → मैं, हूँ → सै respectfully. \
     Keeping tone polite, rural, and culturally accurate. \
     Use soft, local vocabulary as spoken by respectful Haryanvi speakers."
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_names_both_languages() {
        let system = translation_instruction("Hindi", "English");
        assert!(system.contains("from English to Hindi"));
        assert!(system.contains("medical translator"));
    }

    #[test]
    fn test_dialect_aliases_in_instruction() {
        // The ordinary call never sees the dialect name
        let target = languages::effective_name("Haryanvi");
        let system = translation_instruction(target, "English");
        assert!(system.contains("to Hindi"));
        assert!(!system.contains("Haryanvi"));
    }

    #[test]
    fn test_rewrite_instruction_carries_fixed_rules() {
        let system = dialect_rewrite_instruction();
        assert!(system.contains("राम राम सा"));
        assert!(system.contains("सै"));
        assert!(system.contains("आप → तै"));
        assert!(system.contains("Haryanvi"));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = ChatTranslator::new(String::new(), "gpt-4o-mini".to_string());
        assert!(result.is_err());
    }
}
