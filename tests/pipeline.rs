//! Conversation pipeline integration tests
//!
//! Drives full capture-translate-speak cycles over scripted providers, and
//! the chat-completion translation client against a local mock service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::json;

use medisync_gateway::translator::{
    ChatTranslator, ConversationSession, CycleObserver, CycleState, LatestMessage, Orchestrator,
    Speaker, SpeechRecognizer, SpeechSynthesizer, Translator, UNAVAILABLE, Voice, transcript,
};
use medisync_gateway::{Error, Result};

struct ScriptedRecognizer(String);

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self, _audio: &[u8], _lang: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct ScriptedTranslator(String);

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(&self, _text: &str, _target: &str, _source: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _text: &str, _target: &str, _source: &str) -> Result<String> {
        Err(Error::Translation("service down".to_string()))
    }
}

/// Records spoken utterances; optionally fails every call
struct RecordingSynthesizer {
    spoken: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

impl RecordingSynthesizer {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            spoken: Mutex::new(Vec::new()),
            fail,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    async fn speak(&self, text: &str, locale_tag: &str, voice_name: &str) -> Result<()> {
        self.spoken.lock().unwrap().push((
            text.to_string(),
            locale_tag.to_string(),
            voice_name.to_string(),
        ));
        if self.fail {
            return Err(Error::Synthesis("playback failed".to_string()));
        }
        Ok(())
    }
}

/// Records state transitions and latest-message replacements
#[derive(Default)]
struct RecordingObserver {
    states: Mutex<Vec<(Speaker, CycleState)>>,
    latest: Mutex<Vec<LatestMessage>>,
}

impl CycleObserver for RecordingObserver {
    fn state_changed(&self, speaker: Speaker, state: CycleState) {
        self.states.lock().unwrap().push((speaker, state));
    }

    fn latest_message(&self, message: &LatestMessage) {
        self.latest.lock().unwrap().push(message.clone());
    }
}

#[tokio::test]
async fn test_english_to_hindi_doctor_cycle() {
    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(
        session,
        Arc::new(ScriptedTranslator("आप आज कैसा महसूस कर रहे हैं?".to_string())),
    )
    .with_recognizer(Arc::new(ScriptedRecognizer(
        "How are you feeling today?".to_string(),
    )));

    let entry = orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

    assert_eq!(orch.session().len(), 1);
    assert_eq!(entry.speaker, Speaker::Doctor);
    assert_eq!(entry.original, "How are you feeling today?");
    assert_eq!(entry.translated, "आप आज कैसा महसूस कर रहे हैं?");
    assert_eq!(entry.doctor_language, "English");
    assert_eq!(entry.patient_language, "Hindi");
}

#[tokio::test]
async fn test_cycle_walks_the_state_machine() {
    let observer = Arc::new(RecordingObserver::default());
    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(ScriptedTranslator("नमस्ते".to_string())))
        .with_recognizer(Arc::new(ScriptedRecognizer("hello".to_string())))
        .with_observer(observer.clone());

    orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

    let states: Vec<CycleState> = observer
        .states
        .lock()
        .unwrap()
        .iter()
        .map(|(_, s)| *s)
        .collect();
    assert_eq!(
        states,
        [
            CycleState::Listening,
            CycleState::Translating,
            CycleState::Speaking,
            CycleState::Idle
        ]
    );

    let latest = observer.latest.lock().unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].translated, "नमस्ते");
    assert_eq!(latest[0].target_language, "Hindi");
}

#[tokio::test]
async fn test_whitespace_transcript_produces_no_entry() {
    let observer = Arc::new(RecordingObserver::default());
    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(ScriptedTranslator("x".to_string())))
        .with_recognizer(Arc::new(ScriptedRecognizer("   ".to_string())))
        .with_observer(observer.clone());

    assert!(orch.run_cycle(Speaker::Patient, &[]).await.is_err());
    assert!(orch.session().is_empty());

    // The failure is surfaced through the latest-message panel
    let latest = observer.latest.lock().unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].original, "Error processing speech");
    assert!(latest[0].translated.contains("no speech detected"));

    // And the control returns to idle
    let states = observer.states.lock().unwrap();
    assert_eq!(states.last().unwrap().1, CycleState::Idle);
}

#[tokio::test]
async fn test_translation_failure_substitutes_placeholder() {
    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(FailingTranslator))
        .with_recognizer(Arc::new(ScriptedRecognizer("hello".to_string())));

    let entry = orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

    // The cycle completes and logs the placeholder, not an error
    assert_eq!(entry.translated, UNAVAILABLE);
    assert_eq!(orch.session().len(), 1);
}

#[tokio::test]
async fn test_language_pair_pinned_per_entry() {
    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(ScriptedTranslator("t".to_string())))
        .with_recognizer(Arc::new(ScriptedRecognizer("one".to_string())));

    orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();
    orch.set_patient_language("Tamil");
    orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

    let entries = orch.session().entries();
    assert_eq!(entries[0].patient_language, "Hindi");
    assert_eq!(entries[1].patient_language, "Tamil");
}

#[tokio::test]
async fn test_synthesis_error_never_fails_the_cycle() {
    let synth = RecordingSynthesizer::new(true);
    let voices = vec![Voice::new("Hindi India", "hi-IN", false)];

    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(ScriptedTranslator("नमस्ते".to_string())))
        .with_recognizer(Arc::new(ScriptedRecognizer("hello".to_string())))
        .with_synthesizer(synth.clone(), voices);

    let entry = orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();
    assert_eq!(entry.translated, "नमस्ते");

    // Synthesis ran, failed, and the cycle still completed
    let spoken = synth.spoken.lock().unwrap();
    assert_eq!(spoken.len(), 1);
    assert_eq!(spoken[0].1, "hi-IN");
    assert_eq!(spoken[0].2, "Hindi India");
}

#[tokio::test]
async fn test_spoken_voice_follows_fallback_order() {
    let synth = RecordingSynthesizer::new(false);
    // No exact hi-IN voice: the prefix match must be chosen over the default
    let voices = vec![
        Voice::new("Default English", "en-US", true),
        Voice::new("Hindi Latn", "hi-Latn", false),
    ];

    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(ScriptedTranslator("नमस्ते".to_string())))
        .with_recognizer(Arc::new(ScriptedRecognizer("hello".to_string())))
        .with_synthesizer(synth.clone(), voices);

    orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

    let spoken = synth.spoken.lock().unwrap();
    assert_eq!(spoken[0].2, "Hindi Latn");
}

#[tokio::test]
async fn test_transcript_export_after_cycles() {
    let session = ConversationSession::new("English", "Hindi");
    let mut orch = Orchestrator::new(session, Arc::new(ScriptedTranslator("नमस्ते".to_string())))
        .with_recognizer(Arc::new(ScriptedRecognizer("hello doctor".to_string())));

    orch.run_cycle(Speaker::Patient, &[]).await.unwrap();

    let rendered = transcript::render(orch.session()).unwrap();
    assert!(rendered.contains("Doctor's Language: English"));
    assert!(rendered.contains("Patient's Language: Hindi"));
    assert!(rendered.contains("patient: hello doctor"));
    assert!(rendered.contains("Translated (Patient in Hindi → Doctor in English): नमस्ते"));

    // New meeting with declined export clears the log
    orch.new_meeting(None).unwrap();
    assert!(orch.session().is_empty());
    assert!(transcript::render(orch.session()).is_err());
}

/// Shared request log for the mock chat-completion service
type RequestLog = Arc<Mutex<Vec<serde_json::Value>>>;

/// Mock chat-completion service: records requests, answers Hindi first,
/// then the Haryanvi rewrite
async fn mock_chat(State(log): State<RequestLog>, Json(body): Json<serde_json::Value>) -> Json<serde_json::Value> {
    let mut log = log.lock().unwrap();
    log.push(body);
    let content = if log.len() == 1 {
        "आप आज कैसा महसूस कर रहे हैं?"
    } else {
        "राम राम सा, तै आज कैसा महसूस कर रया सै?"
    };
    Json(json!({"choices": [{"message": {"content": content}}]}))
}

async fn spawn_mock_chat() -> (String, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/chat/completions", post(mock_chat))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1/chat/completions"), log)
}

#[tokio::test]
async fn test_dialect_target_runs_two_stage_pipeline() {
    let (endpoint, log) = spawn_mock_chat().await;
    let client =
        ChatTranslator::with_endpoint("test-key".to_string(), "gpt-4o-mini".to_string(), endpoint)
            .unwrap();

    let translated = client
        .translate("How are you feeling today?", "Haryanvi", "English")
        .await
        .unwrap();

    // The rewrite output wins and opens with the fixed greeting
    assert!(translated.starts_with("राम राम सा"));

    let requests = log.lock().unwrap();
    assert_eq!(requests.len(), 2);

    // First call: ordinary translation, dialect aliased to Hindi
    let first_system = requests[0]["messages"][0]["content"].as_str().unwrap();
    assert!(first_system.contains("from English to Hindi"));
    assert!(!first_system.contains("Haryanvi"));
    assert_eq!(
        requests[0]["messages"][1]["content"].as_str().unwrap(),
        "How are you feeling today?"
    );

    // Second call: the rewrite instruction over the Hindi output
    let second_system = requests[1]["messages"][0]["content"].as_str().unwrap();
    assert!(second_system.contains("राम राम सा"));
    assert!(second_system.contains("Haryanvi"));
    assert_eq!(
        requests[1]["messages"][1]["content"].as_str().unwrap(),
        "आप आज कैसा महसूस कर रहे हैं?"
    );
}

#[tokio::test]
async fn test_non_dialect_target_is_single_call() {
    let (endpoint, log) = spawn_mock_chat().await;
    let client =
        ChatTranslator::with_endpoint("test-key".to_string(), "gpt-4o-mini".to_string(), endpoint)
            .unwrap();

    let translated = client
        .translate("How are you feeling today?", "Hindi", "English")
        .await
        .unwrap();

    assert_eq!(translated, "आप आज कैसा महसूस कर रहे हैं?");
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_service_failure_is_a_translation_error() {
    async fn failing(_: Json<serde_json::Value>) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    let app = Router::new().route("/v1/chat/completions", post(failing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ChatTranslator::with_endpoint(
        "test-key".to_string(),
        "gpt-4o-mini".to_string(),
        format!("http://{addr}/v1/chat/completions"),
    )
    .unwrap();

    let result = client.translate("hello", "Hindi", "English").await;
    assert!(matches!(result, Err(Error::Translation(_))));
}
