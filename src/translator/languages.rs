//! Language registry for the conversation pipeline
//!
//! Maps human-readable language names to the two-letter codes used for
//! recognition and translation, and two-letter codes to the full locale
//! tags used for voice selection.

/// Default code used when a language name is not in the registry
pub const DEFAULT_CODE: &str = "en";

/// Display name of the dialect entry
///
/// Haryanvi has no recognition or translation support of its own; its code
/// aliases to Hindi while the display name drives voice selection and the
/// dialect rewrite stage.
pub const DIALECT_NAME: &str = "Haryanvi";

/// Base language the dialect aliases to
pub const DIALECT_BASE_NAME: &str = "Hindi";

/// Supported languages: display name to recognition/translation code
const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Hindi", "hi"),
    ("Kannada", "kn"),
    ("Marathi", "mr"),
    ("Tamil", "ta"),
    ("Telugu", "te"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("Arabic", "ar"),
    ("Bengali", "bn"),
    ("Chinese", "zh"),
    ("German", "de"),
    ("Japanese", "ja"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Urdu", "ur"),
    ("Punjabi", "pa"),
    ("Gujarati", "gu"),
    ("Malayalam", "ml"),
    ("Odia", "or"),
    ("Italian", "it"),
    ("Dutch", "nl"),
    ("Korean", "ko"),
    ("Turkish", "tr"),
    ("Vietnamese", "vi"),
    ("Thai", "th"),
    ("Haryanvi", "hi"),
];

/// Two-letter code to full locale tag for speech synthesis
const LOCALE_TAGS: &[(&str, &str)] = &[
    ("hi", "hi-IN"),
    ("bn", "bn-IN"),
    ("te", "te-IN"),
    ("ta", "ta-IN"),
    ("kn", "kn-IN"),
    ("ml", "ml-IN"),
    ("mr", "mr-IN"),
    ("gu", "gu-IN"),
    ("pa", "pa-IN"),
    ("or", "or-IN"),
    ("ur", "ur-PK"),
    ("en", "en-US"),
    ("es", "es-ES"),
    ("fr", "fr-FR"),
    ("ar", "ar-SA"),
    ("zh", "zh-CN"),
    ("de", "de-DE"),
    ("ja", "ja-JP"),
    ("pt", "pt-PT"),
    ("ru", "ru-RU"),
    ("it", "it-IT"),
    ("nl", "nl-NL"),
    ("ko", "ko-KR"),
    ("tr", "tr-TR"),
    ("vi", "vi-VN"),
    ("th", "th-TH"),
];

/// Indic languages that rarely ship dedicated synthesis voices; these fall
/// back to a shared hi-IN voice during selection
pub const INDIC_SHARED_VOICE: &[&str] = &["bn", "te", "ta", "kn", "ml", "mr", "gu", "pa", "or"];

/// Resolve a display name to its recognition/translation code
///
/// Unknown names fall back to [`DEFAULT_CODE`] rather than failing.
#[must_use]
pub fn code_for(name: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|&&(n, _)| n == name)
        .map_or(DEFAULT_CODE, |&(_, code)| code)
}

/// Whether a display name is the dialect entry
#[must_use]
pub fn is_dialect(name: &str) -> bool {
    name == DIALECT_NAME
}

/// Rewrite a dialect name to its base language for recognition/translation
///
/// Non-dialect names pass through unchanged.
#[must_use]
pub fn effective_name(name: &str) -> &str {
    if is_dialect(name) { DIALECT_BASE_NAME } else { name }
}

/// Resolve a two-letter code to a full locale tag for synthesis
///
/// Unknown codes pass through as-is so a caller-supplied tag still works.
#[must_use]
pub fn locale_tag(code: &str) -> &str {
    LOCALE_TAGS
        .iter()
        .find(|&&(c, _)| c == code)
        .map_or(code, |&(_, tag)| tag)
}

/// All registered languages as (display name, code) pairs
#[must_use]
pub const fn all() -> &'static [(&'static str, &'static str)] {
    LANGUAGES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves_to_two_letter_code() {
        for (name, _) in all() {
            let code = code_for(name);
            assert_eq!(code.len(), 2, "{name} resolved to {code}");
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(code_for("Klingon"), DEFAULT_CODE);
        assert_eq!(code_for(""), DEFAULT_CODE);
    }

    #[test]
    fn test_dialect_aliases_to_hindi_code() {
        assert_eq!(code_for("Haryanvi"), "hi");
        assert_eq!(code_for("Hindi"), "hi");
    }

    #[test]
    fn test_dialect_name_preserved_for_decisions() {
        assert!(is_dialect("Haryanvi"));
        assert!(!is_dialect("Hindi"));
        assert_eq!(effective_name("Haryanvi"), "Hindi");
        assert_eq!(effective_name("Tamil"), "Tamil");
    }

    #[test]
    fn test_locale_tags() {
        assert_eq!(locale_tag("hi"), "hi-IN");
        assert_eq!(locale_tag("ur"), "ur-PK");
        assert_eq!(locale_tag("en"), "en-US");
        // Unknown codes pass through
        assert_eq!(locale_tag("xx-YY"), "xx-YY");
    }

    #[test]
    fn test_indic_subset_is_registered() {
        for code in INDIC_SHARED_VOICE {
            assert!(LOCALE_TAGS.iter().any(|(c, _)| c == code));
        }
    }
}
