//! Tool handlers: validate arguments, call DeepL, shape the output

use serde_json::Value;
use tracing::debug;

use crate::core::client::DeeplClient;
use crate::core::errors::TranslationError;
use crate::core::models::{LanguageListRequest, TranslateRequest};
use crate::mcp::normalize::ToolError;
use crate::mcp::protocol::{ContentBlock, ToolResponse};

/// `translate_text`
pub async fn translate(client: &DeeplClient, arguments: &Value) -> Result<ToolResponse, ToolError> {
    let request = TranslateRequest::from_arguments(arguments)?;
    let translations = client.translate(&request).await?;
    debug!(count = translations.len(), "Translated texts");

    let block = ContentBlock::json(&translations).map_err(TranslationError::from)?;
    Ok(ToolResponse::success(vec![block]))
}

/// `list_languages`
pub async fn list_languages(
    client: &DeeplClient,
    arguments: &Value,
) -> Result<ToolResponse, ToolError> {
    let request = LanguageListRequest::from_arguments(arguments)?;
    let languages = client.list_languages(&request).await?;
    debug!(count = languages.len(), "Fetched languages");

    let block = ContentBlock::json(&languages).map_err(TranslationError::from)?;
    Ok(ToolResponse::success(vec![block]))
}
