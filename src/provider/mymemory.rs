use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::AUTO_DETECT;
use crate::config::ProviderConfig;
use crate::error::{LingoError, Result};
use super::{TranslationProvider, TranslationRequest, TranslationResult};

pub const PROVIDER_NAME: &str = "MyMemory";

/// Client for the MyMemory public translation endpoint
pub struct MyMemoryProvider {
    client: Client,
    config: ProviderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    response_data: ResponseData,
    #[serde(default)]
    matches: Vec<MatchEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct MatchEntry {
    #[serde(default)]
    source: String,
}

impl MyMemoryProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("HTTP client creation should not fail");

        Self { client, config }
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let url = format!("{}/get", self.config.endpoint);
        let langpair = format!("{}|{}", request.from, request.to);

        debug!("Sending translation request to: {}", url);

        // The query serializer percent-encodes the text
        let response = self.client
            .get(&url)
            .query(&[
                ("q", request.source_text.as_str()),
                ("langpair", langpair.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LingoError::Network(format!("Translation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(LingoError::Service { status, message });
        }

        let body = response.text().await
            .map_err(|e| LingoError::Network(format!("Failed to read response body: {}", e)))?;

        parse_response(&body, request.from == AUTO_DETECT)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

/// Extract the translated text and, for auto-detect requests, the reported
/// source language from a MyMemory response body.
fn parse_response(body: &str, auto_source: bool) -> Result<TranslationResult> {
    let api: ApiResponse = serde_json::from_str(body)?;

    let translated_text = api.response_data.translated_text.trim().to_string();
    if translated_text.is_empty() {
        return Err(LingoError::EmptyResult);
    }

    let detected_from = if auto_source {
        api.matches
            .first()
            .map(|entry| entry.source.clone())
            .filter(|source| !source.is_empty())
    } else {
        None
    };

    Ok(TranslationResult {
        translated_text,
        provider_name: PROVIDER_NAME.to_string(),
        detected_from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "responseData": {"translatedText": "नमस्ते"},
        "responseStatus": 200,
        "matches": [{"source": "en", "segment": "hello"}]
    }"#;

    #[test]
    fn test_parse_response_extracts_translation() {
        let result = parse_response(BODY, false).unwrap();
        assert_eq!(result.translated_text, "नमस्ते");
        assert_eq!(result.provider_name, PROVIDER_NAME);
        assert_eq!(result.detected_from, None);
    }

    #[test]
    fn test_detected_language_only_for_auto_requests() {
        let result = parse_response(BODY, true).unwrap();
        assert_eq!(result.detected_from.as_deref(), Some("en"));
    }

    #[test]
    fn test_empty_translation_is_an_error() {
        let body = r#"{"responseData": {"translatedText": "  "}}"#;
        assert!(matches!(parse_response(body, false), Err(LingoError::EmptyResult)));
    }

    #[test]
    fn test_missing_matches_with_auto_source() {
        let body = r#"{"responseData": {"translatedText": "hola"}}"#;
        let result = parse_response(body, true).unwrap();
        assert_eq!(result.detected_from, None);
    }

    #[test]
    fn test_unparsable_body_is_an_error() {
        assert!(parse_response("not json", false).is_err());
    }
}
