//! Transcript rendering and export
//!
//! Pure state-to-text rendering of the conversation log, plus the file
//! export used by "new meeting". Rendering never mutates the session.

use std::path::Path;

use super::session::{ConversationSession, Speaker};
use crate::{Error, Result};

/// Default export file name
pub const EXPORT_FILE_NAME: &str = "conversation_transcript.txt";

/// Render the full conversation to the plain-text transcript format
///
/// Header names both configured languages; each entry contributes one
/// timestamped block noting the direction of translation.
///
/// # Errors
///
/// Returns error when the log is empty; an empty export produces no file.
pub fn render(session: &ConversationSession) -> Result<String> {
    if session.is_empty() {
        return Err(Error::Export("no conversation to download".to_string()));
    }

    let mut content = String::from("Doctor-Patient Conversation Transcript\n\n");
    content.push_str(&format!("Doctor's Language: {}\n", session.doctor_language()));
    content.push_str(&format!("Patient's Language: {}\n\n", session.patient_language()));

    for entry in session.entries() {
        let direction = match entry.speaker {
            Speaker::Doctor => format!(
                "(Doctor in {} → Patient in {})",
                entry.doctor_language, entry.patient_language
            ),
            Speaker::Patient => format!(
                "(Patient in {} → Doctor in {})",
                entry.patient_language, entry.doctor_language
            ),
        };

        content.push_str(&format!(
            "{} {}: {}\n",
            entry.timestamp,
            entry.speaker.as_str(),
            entry.original
        ));
        content.push_str(&format!("Translated {direction}: {}\n\n", entry.translated));
    }

    Ok(content)
}

/// Write the rendered transcript into a directory as `conversation_transcript.txt`
///
/// # Errors
///
/// Returns error when the log is empty or the file cannot be written.
pub fn export_to_dir(session: &ConversationSession, dir: &Path) -> Result<std::path::PathBuf> {
    let content = render(session)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, content)?;
    tracing::info!(path = %path.display(), entries = session.len(), "transcript exported");
    Ok(path)
}
