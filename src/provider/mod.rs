// Translation provider abstraction
//
// The session controller talks to a remote translation service through the
// TranslationProvider trait; the concrete implementation is chosen by the
// factory so tests can substitute a mock.

pub mod mymemory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::Result;

/// One translation to perform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_text: String,
    pub from: String,
    pub to: String,
}

/// Outcome of a successful provider call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub provider_name: String,
    /// Reported source language, present only for auto-detect requests
    pub detected_from: Option<String>,
}

/// Main trait for translation operations
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate the request text in a single attempt, no retries
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult>;

    /// Human-readable provider name for result attribution
    fn name(&self) -> &str;
}

/// Factory for creating provider instances
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the default provider implementation (MyMemory-based)
    pub fn create_provider(config: ProviderConfig) -> Box<dyn TranslationProvider> {
        Box::new(mymemory::MyMemoryProvider::new(config))
    }
}
