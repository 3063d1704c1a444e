//! Conversation orchestration
//!
//! Drives one capture-translate-speak cycle per speaker action through the
//! states `Idle → Listening → Translating → Speaking → Idle`. One cycle per
//! speaker may be in flight at a time; a second attempt is rejected, not
//! queued. The initiating control is restored in a final step regardless of
//! outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use super::capture::{SpeechRecognizer, ensure_speech};
use super::languages;
use super::session::{ConversationEntry, ConversationSession, Speaker};
use super::synthesis::{SpeechSynthesizer, Voice, select_voice};
use super::transcript;
use super::translate::{Translator, UNAVAILABLE};
use crate::{Error, Result};

/// Delay before the "recognizing" label replaces the "listening" label
const RECOGNIZING_LABEL_DELAY: Duration = Duration::from_secs(2);

/// States of one speaker cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Listening,
    Translating,
    Speaking,
}

/// The latest-message panel content, replaced on every cycle
///
/// Error cycles produce a synthetic message whose `translated` field carries
/// the error text; those are never appended to the conversation log.
#[derive(Debug, Clone)]
pub struct LatestMessage {
    pub timestamp: String,
    pub speaker: Speaker,
    pub original: String,
    pub translated: String,
    pub target_language: String,
}

/// Receives cycle progress for rendering
///
/// All methods default to no-ops so headless callers can ignore them.
pub trait CycleObserver: Send + Sync {
    /// A speaker's cycle moved to a new state
    fn state_changed(&self, _speaker: Speaker, _state: CycleState) {}

    /// Recognition is still running after the listening flash
    fn recognizing(&self, _speaker: Speaker) {}

    /// The latest-message panel was replaced
    fn latest_message(&self, _message: &LatestMessage) {}
}

/// Observer that ignores everything
pub struct NullObserver;

impl CycleObserver for NullObserver {}

/// Orchestrates capture, translation, and synthesis over a session
pub struct Orchestrator {
    session: ConversationSession,
    translator: Arc<dyn Translator>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    voices: Vec<Voice>,
    observer: Arc<dyn CycleObserver>,
    in_flight: [bool; 2],
}

impl Orchestrator {
    /// Create an orchestrator over a session and translation client
    #[must_use]
    pub fn new(session: ConversationSession, translator: Arc<dyn Translator>) -> Self {
        Self {
            session,
            translator,
            recognizer: None,
            synthesizer: None,
            voices: Vec::new(),
            observer: Arc::new(NullObserver),
            in_flight: [false; 2],
        }
    }

    /// Attach a speech recognizer; absent means capture is unavailable
    #[must_use]
    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Attach a synthesizer and the available-voice catalog
    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>, voices: Vec<Voice>) -> Self {
        self.synthesizer = Some(synthesizer);
        self.voices = voices;
        self
    }

    /// Attach a cycle observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn CycleObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The underlying session
    #[must_use]
    pub const fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Whether speech capture is available
    #[must_use]
    pub const fn capture_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Whether a cycle is in flight for the given speaker
    #[must_use]
    pub const fn is_busy(&self, speaker: Speaker) -> bool {
        self.in_flight[speaker as usize]
    }

    /// Reconfigure the doctor's language for subsequent entries
    pub fn set_doctor_language(&mut self, language: &str) {
        self.session.set_doctor_language(language);
    }

    /// Reconfigure the patient's language for subsequent entries
    pub fn set_patient_language(&mut self, language: &str) {
        self.session.set_patient_language(language);
    }

    /// Run one capture-translate-speak cycle for the given speaker
    ///
    /// `audio` is the captured utterance. On success exactly one entry is
    /// appended to the log. A capture failure surfaces as a synthetic
    /// latest message and leaves the log untouched; a translation failure
    /// substitutes a placeholder and the cycle continues; a synthesis
    /// failure is logged and the cycle completes.
    ///
    /// # Errors
    ///
    /// Returns error when another cycle is in flight for the speaker or
    /// when capture fails.
    pub async fn run_cycle(&mut self, speaker: Speaker, audio: &[u8]) -> Result<ConversationEntry> {
        if self.is_busy(speaker) {
            return Err(Error::Conversation(format!(
                "{} cycle already in flight",
                speaker.as_str()
            )));
        }

        self.in_flight[speaker as usize] = true;
        let result = self.cycle(speaker, audio).await;

        // Restore the control in a final step regardless of outcome
        self.in_flight[speaker as usize] = false;
        self.observer.state_changed(speaker, CycleState::Idle);
        result
    }

    async fn cycle(&mut self, speaker: Speaker, audio: &[u8]) -> Result<ConversationEntry> {
        let source_name = self.session.source_language(speaker).to_string();
        let target_name = self.session.target_language(speaker).to_string();
        let source_code = languages::code_for(&source_name);

        self.observer.state_changed(speaker, CycleState::Listening);

        let original = match self.capture(speaker, audio, source_code).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(speaker = %speaker.as_str(), error = %e, "capture failed");
                self.surface_error(speaker, &target_name, &e);
                return Err(e);
            }
        };

        self.observer.state_changed(speaker, CycleState::Translating);

        // A failed translation substitutes the placeholder; the cycle goes on
        let translated = match self
            .translator
            .translate(&original, &target_name, &source_name)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "translation failed");
                UNAVAILABLE.to_string()
            }
        };

        self.session.append(speaker, &original, &translated);
        let entry = self
            .session
            .latest()
            .cloned()
            .ok_or_else(|| Error::Conversation("log empty after append".to_string()))?;

        self.observer.latest_message(&LatestMessage {
            timestamp: entry.timestamp.clone(),
            speaker,
            original: original.clone(),
            translated: translated.clone(),
            target_language: target_name.clone(),
        });

        self.observer.state_changed(speaker, CycleState::Speaking);
        self.speak(&translated, &target_name).await;

        Ok(entry)
    }

    /// Capture one utterance, flashing the recognizing label when the
    /// transcription runs past the listening flash
    async fn capture(&self, speaker: Speaker, audio: &[u8], lang_code: &str) -> Result<String> {
        let recognizer = self
            .recognizer
            .as_ref()
            .ok_or_else(|| Error::Recognition("speech recognition unavailable".to_string()))?;

        let capture = recognizer.recognize(audio, lang_code);
        tokio::pin!(capture);

        let transcript = tokio::select! {
            result = &mut capture => result?,
            () = tokio::time::sleep(RECOGNIZING_LABEL_DELAY) => {
                self.observer.recognizing(speaker);
                capture.await?
            }
        };

        ensure_speech(&transcript)
    }

    /// Speak the translated text; errors never abort the cycle
    async fn speak(&self, text: &str, target_name: &str) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };

        let code = languages::code_for(target_name);
        let tag = languages::locale_tag(code);
        let Some(voice) = select_voice(&self.voices, code) else {
            tracing::warn!(language = %target_name, "no synthesis voice available");
            return;
        };

        tracing::debug!(voice = %voice.name, language = %target_name, locale = %tag, "speaking translation");
        if let Err(e) = synthesizer.speak(text, tag, &voice.name).await {
            tracing::error!(error = %e, "synthesis failed");
        }
    }

    /// Replace the latest-message panel with a synthetic error message
    fn surface_error(&self, speaker: Speaker, target_name: &str, error: &Error) {
        self.observer.latest_message(&LatestMessage {
            timestamp: format!("[{}]", Local::now().format("%m/%d/%Y %H:%M:%S")),
            speaker,
            original: "Error processing speech".to_string(),
            translated: error.to_string(),
            target_language: target_name.to_string(),
        });
    }

    /// Start a new meeting
    ///
    /// When the log is non-empty and `export_dir` is given, the transcript
    /// is written there first. The log is cleared unconditionally, whether
    /// or not the export was taken.
    ///
    /// # Errors
    ///
    /// Returns error when an accepted export cannot be written; the log is
    /// still cleared.
    pub fn new_meeting(&mut self, export_dir: Option<&Path>) -> Result<Option<PathBuf>> {
        let exported = match export_dir {
            Some(dir) if !self.session.is_empty() => {
                let result = transcript::export_to_dir(&self.session, dir);
                self.session.clear();
                Some(result?)
            }
            _ => {
                self.session.clear();
                None
            }
        };

        tracing::info!("new meeting started");
        Ok(exported)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str, target: &str, _source: &str) -> Result<String> {
            Ok(format!("{target}:{text}"))
        }
    }

    struct FixedRecognizer(String);

    #[async_trait]
    impl SpeechRecognizer for FixedRecognizer {
        async fn recognize(&self, _audio: &[u8], _lang: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    fn orchestrator(transcript: &str) -> Orchestrator {
        let session = ConversationSession::new("English", "Hindi");
        Orchestrator::new(session, Arc::new(EchoTranslator))
            .with_recognizer(Arc::new(FixedRecognizer(transcript.to_string())))
    }

    #[tokio::test]
    async fn test_successful_cycle_appends_one_entry() {
        let mut orch = orchestrator("How are you feeling today?");
        let entry = orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

        assert_eq!(orch.session().len(), 1);
        assert_eq!(entry.original, "How are you feeling today?");
        assert_eq!(entry.translated, "Hindi:How are you feeling today?");
        assert_eq!(entry.doctor_language, "English");
        assert_eq!(entry.patient_language, "Hindi");
    }

    #[tokio::test]
    async fn test_empty_transcript_never_reaches_the_log() {
        let mut orch = orchestrator("   ");
        let result = orch.run_cycle(Speaker::Patient, &[]).await;

        assert!(result.is_err());
        assert!(orch.session().is_empty());
    }

    #[tokio::test]
    async fn test_missing_recognizer_is_capture_failure() {
        let session = ConversationSession::new("English", "Hindi");
        let mut orch = Orchestrator::new(session, Arc::new(EchoTranslator));

        assert!(!orch.capture_available());
        assert!(orch.run_cycle(Speaker::Doctor, &[]).await.is_err());
        assert!(orch.session().is_empty());
    }

    #[tokio::test]
    async fn test_guard_is_released_after_failure() {
        let mut orch = orchestrator(" ");
        assert!(orch.run_cycle(Speaker::Doctor, &[]).await.is_err());
        assert!(!orch.is_busy(Speaker::Doctor));

        // The control is usable again
        let mut orch = orchestrator("hello");
        orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();
        assert!(!orch.is_busy(Speaker::Doctor));
    }

    #[tokio::test]
    async fn test_new_meeting_declined_export_still_clears() {
        let mut orch = orchestrator("hello");
        orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();
        assert!(!orch.session().is_empty());

        let exported = orch.new_meeting(None).unwrap();
        assert!(exported.is_none());
        assert!(orch.session().is_empty());
    }

    #[tokio::test]
    async fn test_new_meeting_accepted_export_writes_then_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut orch = orchestrator("hello");
        orch.run_cycle(Speaker::Doctor, &[]).await.unwrap();

        let exported = orch.new_meeting(Some(dir.path())).unwrap();
        assert!(exported.unwrap().exists());
        assert!(orch.session().is_empty());
    }

    #[tokio::test]
    async fn test_new_meeting_empty_log_offers_no_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut orch = orchestrator("hello");

        let exported = orch.new_meeting(Some(dir.path())).unwrap();
        assert!(exported.is_none());
        assert!(!dir.path().join(transcript::EXPORT_FILE_NAME).exists());
    }
}
