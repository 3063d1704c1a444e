//! Doctor-patient conversation pipeline
//!
//! One capture-translate-speak cycle per speaker action: speech capture in
//! the speaker's language, medical translation through a chat-completion
//! service (with a two-stage rewrite for the Haryanvi dialect), and speech
//! synthesis in the listener's language. The session-scoped conversation
//! log is append-only and exportable as a plain-text transcript.

pub mod capture;
pub mod languages;
pub mod orchestrator;
pub mod session;
pub mod synthesis;
pub mod transcript;
pub mod translate;

pub use capture::{RemoteRecognizer, SpeechRecognizer};
pub use orchestrator::{CycleObserver, CycleState, LatestMessage, NullObserver, Orchestrator};
pub use session::{ConversationEntry, ConversationSession, Speaker};
pub use synthesis::{RemoteSynthesizer, SpeechSynthesizer, Voice, select_voice};
pub use translate::{ChatTranslator, Translator, UNAVAILABLE};
