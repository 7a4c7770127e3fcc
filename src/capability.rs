//! Capability interfaces for platform integrations.
//!
//! Speech, clipboard, and share integrations are injected into the session
//! as narrow traits. Their failures are user-facing notices local to the
//! integration, kept apart from the core error taxonomy.

/// User-facing notice raised by a capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityError(pub String);

impl CapabilityError {
    pub fn unsupported(capability: &str) -> Self {
        Self(format!("{} is not supported on this platform.", capability))
    }
}

impl std::fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CapabilityError {}

pub type CapabilityResult<T> = std::result::Result<T, CapabilityError>;

/// Supplies recognized text, listening in the given source language
pub trait SpeechInput: Send + Sync {
    fn recognize(&self, language_hint: &str) -> CapabilityResult<String>;
}

/// Reads translated text aloud
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str, locale: &str) -> CapabilityResult<()>;
}

/// Publishes a share message to an external channel
pub trait ShareSink: Send + Sync {
    fn share(&self, message: &str) -> CapabilityResult<()>;
}

/// Copies text for the user
pub trait ClipboardSink: Send + Sync {
    fn copy(&self, text: &str) -> CapabilityResult<()>;
}

/// Speech synthesis locale for a language code
pub fn speech_locale(code: &str) -> &str {
    match code {
        "zh" => "zh-CN",
        other => other,
    }
}

/// Combined rendering used by copy-both and share
pub fn combined_message(from: &str, text: &str, to: &str, translated: &str) -> String {
    format!("Original ({}): {}\nTranslated ({}): {}", from, text, to, translated)
}

pub fn whatsapp_share_url(message: &str) -> String {
    format!("https://wa.me/?text={}", urlencoding::encode(message))
}

pub fn telegram_share_url(message: &str) -> String {
    format!("https://t.me/share/url?url=&text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_locale_mapping() {
        assert_eq!(speech_locale("zh"), "zh-CN");
        assert_eq!(speech_locale("hi"), "hi");
    }

    #[test]
    fn test_combined_message_rendering() {
        let message = combined_message("en", "hello", "hi", "नमस्ते");
        assert_eq!(message, "Original (en): hello\nTranslated (hi): नमस्ते");
    }

    #[test]
    fn test_share_urls_are_percent_encoded() {
        let url = whatsapp_share_url("a b\nc");
        assert_eq!(url, "https://wa.me/?text=a%20b%0Ac");

        let url = telegram_share_url("a&b");
        assert!(url.starts_with("https://t.me/share/url?url=&text="));
        assert!(url.ends_with("a%26b"));
    }
}
