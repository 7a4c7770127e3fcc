//! Session controller: validation, provider orchestration, history.
//!
//! One controller owns one user session. It validates input before any
//! network call, keeps the displayed state coherent (loading flag released
//! on every exit path, stale responses discarded), and records successful
//! translations into the history store.

use chrono::Local;
use tracing::{debug, warn};

use crate::capability::{
    combined_message, speech_locale, CapabilityError, CapabilityResult, ClipboardSink,
    ShareSink, SpeechInput, SpeechOutput,
};
use crate::catalog::{self, AUTO_DETECT};
use crate::error::{LingoError, Result};
use crate::history::{HistoryEntry, HistoryStore};
use crate::provider::{TranslationProvider, TranslationRequest, TranslationResult};

/// Generic user-facing message for provider failures; the cause is logged
pub const GENERIC_FAILURE_MESSAGE: &str = "Translation failed. Try again later.";

/// Displayed state owned by the controller
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub input: String,
    pub output: String,
    pub provider_name: String,
    pub detected_from: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct SessionController {
    provider: Box<dyn TranslationProvider>,
    history: HistoryStore,
    state: SessionState,
    speech_input: Option<Box<dyn SpeechInput>>,
    speech_output: Option<Box<dyn SpeechOutput>>,
    share_sink: Option<Box<dyn ShareSink>>,
    clipboard: Option<Box<dyn ClipboardSink>>,
    // Request-sequence token; only the latest submit's response is applied
    seq: u64,
}

impl SessionController {
    pub fn new(provider: Box<dyn TranslationProvider>, history: HistoryStore) -> Self {
        Self {
            provider,
            history,
            state: SessionState::default(),
            speech_input: None,
            speech_output: None,
            share_sink: None,
            clipboard: None,
            seq: 0,
        }
    }

    pub fn with_speech_input(mut self, speech: Box<dyn SpeechInput>) -> Self {
        self.speech_input = Some(speech);
        self
    }

    pub fn with_speech_output(mut self, speech: Box<dyn SpeechOutput>) -> Self {
        self.speech_output = Some(speech);
        self
    }

    pub fn with_share_sink(mut self, sink: Box<dyn ShareSink>) -> Self {
        self.share_sink = Some(sink);
        self
    }

    pub fn with_clipboard(mut self, sink: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(sink);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    /// Validate and translate, recording the result into history.
    ///
    /// Validation failures never reach the provider. Provider failures
    /// surface as a generic message in the session state while the cause
    /// goes to the log. Every exit path leaves `loading = false`.
    pub async fn submit(&mut self, text: &str, from: &str, to: &str) -> Result<TranslationResult> {
        self.state.error = None;
        self.state.output.clear();
        self.state.detected_from = None;

        if let Err(e) = validate(text, from, to) {
            if let LingoError::Validation(message) = &e {
                self.state.error = Some(message.clone());
            }
            return Err(e);
        }

        if !catalog::is_valid_source(from) || !catalog::is_valid_target(to) {
            debug!("Language pair {}|{} is outside the catalog", from, to);
        }

        self.seq += 1;
        let seq = self.seq;

        self.state.input = text.to_string();
        self.state.loading = true;

        let request = TranslationRequest {
            source_text: text.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        };
        let outcome = self.provider.translate(&request).await;

        if seq != self.seq {
            // A newer submit owns the displayed state now
            debug!("Discarding superseded response for request {}", seq);
            return outcome;
        }
        self.state.loading = false;

        match outcome {
            Ok(result) => {
                self.state.output = result.translated_text.clone();
                self.state.provider_name = result.provider_name.clone();
                if from == AUTO_DETECT {
                    self.state.detected_from = result.detected_from.clone();
                }

                let entry = HistoryEntry {
                    input: text.to_string(),
                    output: result.translated_text.clone(),
                    from: from.to_string(),
                    to: to.to_string(),
                    timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                };
                if let Err(e) = self.history.record(entry) {
                    warn!("Failed to persist history entry: {}", e);
                }

                Ok(result)
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                self.state.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// Swap the language pair, clearing any previous result or error
    pub fn swap(&mut self, from: &str, to: &str) -> (String, String) {
        self.state.output.clear();
        self.state.error = None;
        self.state.detected_from = None;
        (to.to_string(), from.to_string())
    }

    /// Reset input and output to empty
    pub fn clear(&mut self) {
        self.state.input.clear();
        self.state.output.clear();
        self.state.error = None;
    }

    /// Recognize spoken input in the source language; the caller feeds the
    /// text back into `submit`.
    pub fn recognize_input(&self, from: &str) -> CapabilityResult<String> {
        match &self.speech_input {
            Some(speech) => speech.recognize(from),
            None => Err(CapabilityError::unsupported("Speech recognition")),
        }
    }

    /// Read the current translation aloud in the target language
    pub fn speak_translated(&self, to: &str) -> CapabilityResult<()> {
        if self.state.output.is_empty() {
            return Ok(());
        }

        match &self.speech_output {
            Some(speech) => speech.speak(&self.state.output, speech_locale(to)),
            None => Err(CapabilityError::unsupported("Speech synthesis")),
        }
    }

    /// Share the combined original + translated rendering
    pub fn share_translation(&self, from: &str, to: &str) -> CapabilityResult<()> {
        if self.state.output.is_empty() {
            return Ok(());
        }

        let message = combined_message(from, &self.state.input, to, &self.state.output);
        match &self.share_sink {
            Some(sink) => sink.share(&message),
            None => Err(CapabilityError::unsupported("Sharing")),
        }
    }

    /// Copy the translated text
    pub fn copy_translated(&self) -> CapabilityResult<()> {
        if self.state.output.is_empty() {
            return Ok(());
        }

        match &self.clipboard {
            Some(sink) => sink.copy(&self.state.output),
            None => Err(CapabilityError::unsupported("Clipboard")),
        }
    }

    /// Copy the combined original + translated rendering
    pub fn copy_both(&self, from: &str, to: &str) -> CapabilityResult<()> {
        if self.state.input.is_empty() || self.state.output.is_empty() {
            return Ok(());
        }

        let message = combined_message(from, &self.state.input, to, &self.state.output);
        match &self.clipboard {
            Some(sink) => sink.copy(&message),
            None => Err(CapabilityError::unsupported("Clipboard")),
        }
    }
}

fn validate(text: &str, from: &str, to: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(LingoError::Validation(
            "Please enter text to translate.".to_string(),
        ));
    }

    if from == to {
        return Err(LingoError::Validation(
            "Source and target languages are the same. Choose a different target.".to_string(),
        ));
    }

    if to == AUTO_DETECT {
        return Err(LingoError::Validation(
            "Auto-detect is only valid as a source language.".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use std::sync::{Arc, Mutex};

    use crate::history::MemoryHistoryStorage;
    use crate::provider::mymemory::PROVIDER_NAME;

    mock! {
        Provider {}

        #[async_trait]
        impl TranslationProvider for Provider {
            async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult>;
            fn name(&self) -> &str;
        }
    }

    fn empty_history() -> HistoryStore {
        HistoryStore::load(Box::new(MemoryHistoryStorage::new()))
    }

    fn ok_result(text: &str, detected: Option<&str>) -> TranslationResult {
        TranslationResult {
            translated_text: text.to_string(),
            provider_name: PROVIDER_NAME.to_string(),
            detected_from: detected.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_submit_translates_and_records_history() {
        let mut provider = MockProvider::new();
        provider
            .expect_translate()
            .withf(|request| {
                request.source_text == "hello" && request.from == "en" && request.to == "hi"
            })
            .times(1)
            .returning(|_| Ok(ok_result("नमस्ते", None)));

        let mut session = SessionController::new(Box::new(provider), empty_history());
        let result = session.submit("hello", "en", "hi").await.unwrap();

        assert_eq!(result.translated_text, "नमस्ते");
        assert_eq!(session.state().output, "नमस्ते");
        assert_eq!(session.state().provider_name, PROVIDER_NAME);
        assert!(!session.state().loading);
        assert!(session.state().error.is_none());

        let entries = session.history().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input, "hello");
        assert_eq!(entries[0].output, "नमस्ते");
        assert_eq!(entries[0].from, "en");
        assert_eq!(entries[0].to, "hi");
        assert!(!entries[0].timestamp.is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_fails_without_provider_call() {
        let mut provider = MockProvider::new();
        provider.expect_translate().times(0);

        let mut session = SessionController::new(Box::new(provider), empty_history());
        let result = session.submit("   \t", "en", "hi").await;

        assert!(matches!(result, Err(LingoError::Validation(_))));
        assert!(session.state().error.is_some());
        assert!(!session.state().loading);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_same_language_pair_fails_validation() {
        let mut provider = MockProvider::new();
        provider.expect_translate().times(0);

        let mut session = SessionController::new(Box::new(provider), empty_history());
        let result = session.submit("x", "en", "en").await;

        assert!(matches!(result, Err(LingoError::Validation(_))));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_auto_detect_target_fails_validation() {
        let mut provider = MockProvider::new();
        provider.expect_translate().times(0);

        let mut session = SessionController::new(Box::new(provider), empty_history());
        let result = session.submit("hello", "en", AUTO_DETECT).await;

        assert!(matches!(result, Err(LingoError::Validation(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_generic_message() {
        let mut provider = MockProvider::new();
        provider
            .expect_translate()
            .times(1)
            .returning(|_| Err(LingoError::Network("connection refused".to_string())));

        let mut session = SessionController::new(Box::new(provider), empty_history());
        let result = session.submit("hello", "en", "hi").await;

        assert!(matches!(result, Err(LingoError::Network(_))));
        assert_eq!(session.state().error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
        assert!(!session.state().loading);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_detected_language_shown_only_for_auto_source() {
        let mut provider = MockProvider::new();
        provider
            .expect_translate()
            .returning(|_| Ok(ok_result("hola", Some("en"))));

        let mut session = SessionController::new(Box::new(provider), empty_history());

        session.submit("hello", AUTO_DETECT, "es").await.unwrap();
        assert_eq!(session.state().detected_from.as_deref(), Some("en"));

        // With an explicit source the report is dropped even if present
        session.submit("hello", "en", "es").await.unwrap();
        assert_eq!(session.state().detected_from, None);
    }

    #[tokio::test]
    async fn test_swap_clears_result_and_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_translate()
            .returning(|_| Ok(ok_result("नमस्ते", None)));

        let mut session = SessionController::new(Box::new(provider), empty_history());
        session.submit("hello", "en", "hi").await.unwrap();

        let (from, to) = session.swap("en", "hi");
        assert_eq!((from.as_str(), to.as_str()), ("hi", "en"));
        assert!(session.state().output.is_empty());
        assert!(session.state().error.is_none());
    }

    #[tokio::test]
    async fn test_clear_resets_input_and_output() {
        let mut provider = MockProvider::new();
        provider
            .expect_translate()
            .returning(|_| Ok(ok_result("नमस्ते", None)));

        let mut session = SessionController::new(Box::new(provider), empty_history());
        session.submit("hello", "en", "hi").await.unwrap();
        session.clear();

        assert!(session.state().input.is_empty());
        assert!(session.state().output.is_empty());
    }

    #[tokio::test]
    async fn test_share_uses_combined_rendering() {
        struct RecordingSink(Arc<Mutex<Vec<String>>>);
        impl ShareSink for RecordingSink {
            fn share(&self, message: &str) -> CapabilityResult<()> {
                self.0.lock().unwrap().push(message.to_string());
                Ok(())
            }
        }

        let mut provider = MockProvider::new();
        provider
            .expect_translate()
            .returning(|_| Ok(ok_result("नमस्ते", None)));

        let shared = Arc::new(Mutex::new(Vec::new()));
        let mut session = SessionController::new(Box::new(provider), empty_history())
            .with_share_sink(Box::new(RecordingSink(shared.clone())));

        session.submit("hello", "en", "hi").await.unwrap();
        session.share_translation("en", "hi").unwrap();

        let messages = shared.lock().unwrap();
        assert_eq!(messages.as_slice(), ["Original (en): hello\nTranslated (hi): नमस्ते"]);
    }

    #[test]
    fn test_missing_capabilities_are_notices() {
        let provider = MockProvider::new();
        let session = SessionController::new(Box::new(provider), empty_history());

        assert!(session.recognize_input("en").is_err());
        // No translation yet, so speak/share/copy are quiet no-ops
        assert!(session.speak_translated("hi").is_ok());
        assert!(session.share_translation("en", "hi").is_ok());
        assert!(session.copy_translated().is_ok());
    }
}
