//! Conversation pipeline endpoints
//!
//! Translation, server-side transcription and synthesis, the language
//! registry, and voice selection for clients that report their own
//! available voices.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiState, Success, success};
use crate::translator::{Voice, languages, select_voice};

#[derive(Deserialize)]
struct TranslateRequest {
    text: String,
    source_language: String,
    target_language: String,
}

#[derive(Serialize)]
struct TranslateResponse {
    translated: String,
    source_language: String,
    target_language: String,
}

#[derive(Serialize)]
struct LanguageEntry {
    name: &'static str,
    code: &'static str,
}

/// Which pipeline capabilities this gateway exposes
#[derive(Serialize)]
struct Capabilities {
    translation_available: bool,
    capture_available: bool,
    synthesis_available: bool,
}

#[derive(Deserialize)]
struct TranscribeParams {
    /// Display name of the speaker's language
    language: String,
}

#[derive(Serialize)]
struct TranscribeResponse {
    text: String,
}

#[derive(Deserialize)]
struct SynthesizeRequest {
    text: String,
}

#[derive(Deserialize)]
struct SelectVoiceRequest {
    /// Display name of the listener's language
    language: String,
    /// Voices available in the caller's playback environment
    voices: Vec<VoiceEntry>,
}

#[derive(Deserialize, Serialize)]
struct VoiceEntry {
    name: String,
    lang: String,
    #[serde(default)]
    default: bool,
}

#[derive(Serialize)]
struct SelectVoiceResponse {
    voice: Option<VoiceEntry>,
    locale: String,
}

/// Translate one utterance between two registered languages
///
/// The dialect second stage runs inside the client when the target is the
/// dialect entry; callers always get a single translated string back.
async fn translate(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<TranslateRequest>,
) -> Result<Json<Success<TranslateResponse>>, ApiError> {
    let translator = state
        .providers
        .translator
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("translation not configured"))?;

    let translated = translator
        .translate(&body.text, &body.target_language, &body.source_language)
        .await?;

    Ok(success(TranslateResponse {
        translated,
        source_language: body.source_language,
        target_language: body.target_language,
    }))
}

/// Transcribe one utterance of audio in the given language
async fn transcribe(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<TranscribeParams>,
    body: Bytes,
) -> Result<Json<Success<TranscribeResponse>>, ApiError> {
    let recognizer = state
        .providers
        .recognizer
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("speech recognition not configured"))?;

    if body.is_empty() {
        return Err(crate::Error::Recognition("empty audio data".to_string()).into());
    }

    let code = languages::code_for(&params.language);
    let text = recognizer.recognize(&body, code).await?;

    Ok(success(TranscribeResponse { text }))
}

/// Synthesize text to speech, answering MP3 audio
async fn synthesize(
    State(state): State<Arc<ApiState>>,
    Json(body): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    let synthesizer = state
        .providers
        .synthesizer
        .as_ref()
        .ok_or_else(|| ApiError::unavailable("speech synthesis not configured"))?;

    if body.text.is_empty() {
        return Err(crate::Error::Synthesis("empty text".to_string()).into());
    }

    let audio = synthesizer
        .synthesize(&body.text, &state.providers.tts_voice)
        .await?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

/// Report which pipeline capabilities are configured
async fn capabilities(State(state): State<Arc<ApiState>>) -> Json<Capabilities> {
    Json(Capabilities {
        translation_available: state.providers.translator.is_some(),
        capture_available: state.providers.recognizer.is_some(),
        synthesis_available: state.providers.synthesizer.is_some(),
    })
}

/// The language registry as name/code pairs
async fn list_languages() -> Json<Success<Vec<LanguageEntry>>> {
    let entries = languages::all()
        .iter()
        .map(|&(name, code)| LanguageEntry { name, code })
        .collect();
    success(entries)
}

/// Pick a voice for a language from the caller's available voices
///
/// Applies the deterministic fallback chain so clients don't reimplement it.
async fn pick_voice(Json(body): Json<SelectVoiceRequest>) -> Json<Success<SelectVoiceResponse>> {
    let code = languages::code_for(&body.language);
    let catalog: Vec<Voice> = body
        .voices
        .iter()
        .map(|v| Voice {
            name: v.name.clone(),
            lang: v.lang.clone(),
            default: v.default,
        })
        .collect();

    let voice = select_voice(&catalog, code).map(|v| VoiceEntry {
        name: v.name.clone(),
        lang: v.lang.clone(),
        default: v.default,
    });

    success(SelectVoiceResponse {
        voice,
        locale: languages::locale_tag(code).to_string(),
    })
}

/// Build translator router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/api/transcribe", post(transcribe))
        .route("/api/synthesize", post(synthesize))
        .route("/api/translator/capabilities", get(capabilities))
        .route("/api/translator/languages", get(list_languages))
        .route("/api/translator/select-voice", post(pick_voice))
        .with_state(state)
}
