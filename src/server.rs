//! Server assembly
//!
//! Wires configuration, database and the pipeline providers into the API
//! router and runs it. A failed initial database open is fatal; everything
//! after startup answers per-request errors instead.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::{self, ApiState, Providers};
use crate::config::Config;
use crate::db;
use crate::translator::{ChatTranslator, RemoteRecognizer, RemoteSynthesizer};
use crate::{Error, Result};

/// Build API state from configuration
///
/// # Errors
///
/// Returns error if the database cannot be opened or migrated
pub fn build_state(config: &Config) -> Result<Arc<ApiState>> {
    std::fs::create_dir_all(&config.data_dir)?;
    let pool = db::init(config.db_path())?;

    if config.seed_demo_data {
        db::seed::run(&pool)?;
    }

    let providers = build_providers(config)?;
    if providers.translator.is_none() {
        tracing::warn!("no API key configured, conversation pipeline disabled");
    }

    Ok(Arc::new(ApiState::new(pool, providers)))
}

/// Build the pipeline providers the configuration allows
fn build_providers(config: &Config) -> Result<Providers> {
    let mut providers = Providers {
        tts_voice: config.tts_voice.clone(),
        ..Providers::default()
    };

    let Some(api_key) = config.api_key.clone() else {
        return Ok(providers);
    };

    let translator = match &config.translation_endpoint {
        Some(endpoint) => ChatTranslator::with_endpoint(
            api_key.clone(),
            config.translation_model.clone(),
            endpoint.clone(),
        )?,
        None => ChatTranslator::new(api_key.clone(), config.translation_model.clone())?,
    };
    providers.translator = Some(Arc::new(translator));

    if config.speech_enabled {
        providers.recognizer = Some(Arc::new(RemoteRecognizer::new(
            api_key.clone(),
            config.stt_model.clone(),
        )?));
        providers.synthesizer = Some(Arc::new(RemoteSynthesizer::new(
            api_key,
            config.tts_model.clone(),
            config.tts_speed,
        )?));
    }

    Ok(providers)
}

/// Run the API server until interrupted
///
/// # Errors
///
/// Returns error if startup fails; serving errors terminate the loop
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let router = api::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "gateway listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| Error::Config(format!("server error: {e}")))?;

    Ok(())
}
