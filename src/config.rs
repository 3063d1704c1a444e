//! Gateway configuration
//!
//! Settings resolve in three layers: built-in defaults, an optional TOML
//! config file, then environment variables. All file fields are optional —
//! the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{Error, Result};

/// Default API server port
pub const DEFAULT_PORT: u16 = 3002;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,

    /// Translation service configuration
    #[serde(default)]
    pub translation: TranslationFileConfig,

    /// Speech recognition configuration
    #[serde(default)]
    pub speech: SpeechFileConfig,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// API server port
    pub port: Option<u16>,

    /// Data directory override
    pub data_dir: Option<String>,

    /// Seed the demo dataset at startup
    pub seed_demo_data: Option<bool>,
}

/// Translation service configuration
#[derive(Debug, Default, Deserialize)]
pub struct TranslationFileConfig {
    /// Chat-completion model (e.g. "gpt-4o-mini")
    pub model: Option<String>,

    /// Endpoint override for self-hosted gateways
    pub endpoint: Option<String>,
}

/// Speech recognition configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// Enable the speech capture seam
    pub enabled: Option<bool>,

    /// Transcription model (e.g. "whisper-1")
    pub stt_model: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice identifier (e.g. "alloy")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f32>,
}

/// Resolved gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub seed_demo_data: bool,
    /// API key for translation and speech services; absent disables both
    pub api_key: Option<String>,
    pub translation_model: String,
    pub translation_endpoint: Option<String>,
    pub speech_enabled: bool,
    pub stt_model: String,
    pub tts_model: String,
    pub tts_voice: String,
    pub tts_speed: f32,
}

impl Config {
    /// Load configuration from file, environment and defaults
    ///
    /// # Errors
    ///
    /// Returns error if the data directory cannot be determined
    pub fn load(port_override: Option<u16>) -> Result<Self> {
        let file = load_config_file();

        let data_dir = file
            .server
            .data_dir
            .map_or_else(default_data_dir, |d| Ok(PathBuf::from(d)))?;

        let port = port_override
            .or(file.server.port)
            .unwrap_or(DEFAULT_PORT);

        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        Ok(Self {
            port,
            data_dir,
            seed_demo_data: file.server.seed_demo_data.unwrap_or(true),
            api_key,
            translation_model: file
                .translation
                .model
                .unwrap_or_else(|| "gpt-4o-mini".to_string()),
            translation_endpoint: file.translation.endpoint,
            speech_enabled: file.speech.enabled.unwrap_or(true),
            stt_model: file.speech.stt_model.unwrap_or_else(|| "whisper-1".to_string()),
            tts_model: file.speech.tts_model.unwrap_or_else(|| "tts-1".to_string()),
            tts_voice: file.speech.tts_voice.unwrap_or_else(|| "alloy".to_string()),
            tts_speed: file.speech.tts_speed.unwrap_or(0.9),
        })
    }

    /// Path of the `SQLite` database file
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("medisync.db")
    }
}

/// Standard config file location, `~/.config/medisync/config.toml`
fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "medisync", "medisync")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("dev", "medisync", "medisync")
        .ok_or_else(|| Error::Config("could not determine data directory".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Load the TOML config file from the standard path
///
/// Returns defaults if the file doesn't exist or can't be parsed.
fn load_config_file() -> ConfigFile {
    let Some(path) = config_file_path() else {
        return ConfigFile::default();
    };

    if !path.exists() {
        return ConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                ConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            ConfigFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_overlay_is_fully_optional() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.server.port.is_none());
        assert!(file.translation.model.is_none());
    }

    #[test]
    fn test_partial_file_parses() {
        let file: ConfigFile = toml::from_str(
            r#"
            [server]
            port = 4000

            [translation]
            model = "gpt-4o"
            "#,
        )
        .unwrap();

        assert_eq!(file.server.port, Some(4000));
        assert_eq!(file.translation.model.as_deref(), Some("gpt-4o"));
        assert!(file.speech.stt_model.is_none());
    }
}
