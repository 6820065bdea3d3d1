//! Async DeepL client
//!
//! Every call issues exactly one HTTP request; failures are reported on the
//! first attempt.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::DeeplConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{
    LanguageDescriptor, LanguageListRequest, TranslateRequest, TranslateResponse,
    TranslationResult,
};

/// Authorization scheme expected by DeepL
const AUTH_SCHEME: &str = "DeepL-Auth-Key";

/// Async client for the DeepL v2 API
#[derive(Debug, Clone)]
pub struct DeeplClient {
    client: reqwest::Client,
    config: Arc<DeeplConfig>,
}

impl DeeplClient {
    /// Create a new client
    pub fn new(config: DeeplConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| TranslationError::ConfigError {
                message: e.to_string(),
            })?;

        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10);
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Translate texts, one result per input in input order
    pub async fn translate(&self, request: &TranslateRequest) -> Result<Vec<TranslationResult>> {
        debug!(
            count = request.text.len(),
            target_lang = %request.target_lang,
            source_lang = ?request.source_lang,
            "Sending translate request"
        );

        let response = self
            .client
            .post(self.config.url("/v2/translate"))
            .header("Authorization", self.auth_header())
            .json(request)
            .send()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })?;

        let body: TranslateResponse = Self::parse_response(response).await?;

        if body.translations.len() != request.text.len() {
            return Err(TranslationError::InvalidResponseError {
                message: format!(
                    "expected {} translations, received {}",
                    request.text.len(),
                    body.translations.len()
                ),
            });
        }

        Ok(body.translations)
    }

    /// List supported languages, optionally filtered by source/target
    pub async fn list_languages(
        &self,
        request: &LanguageListRequest,
    ) -> Result<Vec<LanguageDescriptor>> {
        debug!(language_type = ?request.language_type, "Sending languages request");

        let mut builder = self
            .client
            .get(self.config.url("/v2/languages"))
            .header("Authorization", self.auth_header());
        if let Some(language_type) = request.language_type {
            builder = builder.query(&[("type", language_type.as_str())]);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })?;

        Self::parse_response(response).await
    }

    fn auth_header(&self) -> String {
        format!("{} {}", AUTH_SCHEME, self.config.api_key)
    }

    /// Decode a success body or turn the failure into `ApiError`
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| TranslationError::InvalidResponseError {
                    message: e.to_string(),
                });
        }

        let status_code = status.as_u16();
        let error_text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<serde_json::Value>(&error_text)
            .ok()
            .or_else(|| {
                (!error_text.is_empty()).then(|| serde_json::Value::String(error_text.clone()))
            });

        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status code {}", status_code));

        warn!(status = status_code, %message, "Upstream request failed");

        Err(TranslationError::ApiError {
            status: status_code,
            message,
            body,
        })
    }
}
