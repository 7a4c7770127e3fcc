//! Supported language catalog.
//!
//! Static data loaded once; the auto-detect sentinel is a valid source
//! language but never a valid target.

/// Source-language code meaning "let the service detect the language"
pub const AUTO_DETECT: &str = "auto";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    pub code: &'static str,
    pub name: &'static str,
}

const LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry { code: AUTO_DETECT, name: "Detect language" },
    LanguageEntry { code: "en", name: "English" },
    LanguageEntry { code: "hi", name: "Hindi" },
    LanguageEntry { code: "zh", name: "Chinese" },
    LanguageEntry { code: "es", name: "Spanish" },
    LanguageEntry { code: "fr", name: "French" },
    LanguageEntry { code: "de", name: "German" },
    LanguageEntry { code: "ar", name: "Arabic" },
    LanguageEntry { code: "pt", name: "Portuguese" },
    LanguageEntry { code: "ru", name: "Russian" },
    LanguageEntry { code: "ja", name: "Japanese" },
    LanguageEntry { code: "it", name: "Italian" },
    LanguageEntry { code: "nl", name: "Dutch" },
    LanguageEntry { code: "pl", name: "Polish" },
    LanguageEntry { code: "tr", name: "Turkish" },
    LanguageEntry { code: "vi", name: "Vietnamese" },
    LanguageEntry { code: "id", name: "Indonesian" },
    LanguageEntry { code: "ko", name: "Korean" },
    LanguageEntry { code: "bn", name: "Bengali" },
    LanguageEntry { code: "ur", name: "Urdu" },
    LanguageEntry { code: "th", name: "Thai" },
    LanguageEntry { code: "sv", name: "Swedish" },
    LanguageEntry { code: "da", name: "Danish" },
    LanguageEntry { code: "fi", name: "Finnish" },
    LanguageEntry { code: "hu", name: "Hungarian" },
];

/// All catalog entries, auto-detect sentinel first
pub fn all() -> &'static [LanguageEntry] {
    LANGUAGES
}

/// Look up a catalog entry by language code
pub fn find(code: &str) -> Option<&'static LanguageEntry> {
    LANGUAGES.iter().find(|entry| entry.code == code)
}

/// Human-readable name for a code, falling back to the code itself
pub fn name_for(code: &str) -> &str {
    find(code).map(|entry| entry.name).unwrap_or(code)
}

/// Valid as a source language: any catalog code, including auto-detect
pub fn is_valid_source(code: &str) -> bool {
    find(code).is_some()
}

/// Valid as a target language: any catalog code except the auto sentinel
pub fn is_valid_target(code: &str) -> bool {
    code != AUTO_DETECT && find(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<_> = all().iter().map(|entry| entry.code).collect();
        assert_eq!(codes.len(), all().len());
    }

    #[test]
    fn test_auto_is_source_only() {
        assert!(is_valid_source(AUTO_DETECT));
        assert!(!is_valid_target(AUTO_DETECT));
    }

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(name_for("hi"), "Hindi");
        assert_eq!(name_for("xx"), "xx");
        assert!(is_valid_target("hi"));
        assert!(!is_valid_source("xx"));
    }
}
