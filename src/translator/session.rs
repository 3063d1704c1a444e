//! Conversation session state
//!
//! The session owns the append-only conversation log and the two configured
//! languages. Entries pin the language pair in effect at creation time, so a
//! mid-conversation language change never rewrites history. Rendering and
//! export read the log; only `append` and `clear` mutate it.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Which party produced an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Doctor,
    Patient,
}

impl Speaker {
    /// Lowercase label used in transcripts
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        }
    }

    /// Capitalized label used in headers and UI
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Patient => "Patient",
        }
    }
}

/// One exchanged utterance and its translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// Capture-time timestamp, locale formatted, e.g. "[05/15/2023 14:03:22]"
    pub timestamp: String,
    pub speaker: Speaker,
    /// Raw recognized speech
    pub original: String,
    /// Output of the translation client
    pub translated: String,
    /// Doctor's language at the moment this entry was created
    pub doctor_language: String,
    /// Patient's language at the moment this entry was created
    pub patient_language: String,
}

/// A doctor-patient conversation session
///
/// Created empty, appended to on every successful capture-translate cycle,
/// cleared in full only by a new meeting.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    doctor_language: String,
    patient_language: String,
    entries: Vec<ConversationEntry>,
}

impl ConversationSession {
    /// Create an empty session with the given language configuration
    #[must_use]
    pub fn new(doctor_language: &str, patient_language: &str) -> Self {
        Self {
            doctor_language: doctor_language.to_string(),
            patient_language: patient_language.to_string(),
            entries: Vec::new(),
        }
    }

    /// Doctor's currently configured language
    #[must_use]
    pub fn doctor_language(&self) -> &str {
        &self.doctor_language
    }

    /// Patient's currently configured language
    #[must_use]
    pub fn patient_language(&self) -> &str {
        &self.patient_language
    }

    /// Reconfigure the doctor's language; prior entries are unaffected
    pub fn set_doctor_language(&mut self, language: &str) {
        self.doctor_language = language.to_string();
    }

    /// Reconfigure the patient's language; prior entries are unaffected
    pub fn set_patient_language(&mut self, language: &str) {
        self.patient_language = language.to_string();
    }

    /// The language the given speaker talks in
    #[must_use]
    pub fn source_language(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Doctor => &self.doctor_language,
            Speaker::Patient => &self.patient_language,
        }
    }

    /// The language the given speaker's counterpart listens in
    #[must_use]
    pub fn target_language(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Doctor => &self.patient_language,
            Speaker::Patient => &self.doctor_language,
        }
    }

    /// Append one completed exchange, pinning the current language pair
    pub fn append(&mut self, speaker: Speaker, original: &str, translated: &str) {
        self.entries.push(ConversationEntry {
            timestamp: format!("[{}]", Local::now().format("%m/%d/%Y %H:%M:%S")),
            speaker,
            original: original.to_string(),
            translated: translated.to_string(),
            doctor_language: self.doctor_language.clone(),
            patient_language: self.patient_language.clone(),
        });
    }

    /// All entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    /// The most recent entry, if any
    #[must_use]
    pub fn latest(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Discard all entries; language configuration survives
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
