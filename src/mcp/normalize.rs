//! Turns handler failures into `isError` tool responses

use serde_json::Value;
use thiserror::Error;

use crate::core::errors::TranslationError;
use crate::mcp::protocol::{ErrorCode, McpError, ToolResponse};

/// Any failure raised while serving a tool call
#[derive(Error, Debug)]
pub enum ToolError {
    /// Already a protocol error, passed through as-is
    #[error(transparent)]
    Protocol(#[from] McpError),

    /// Validation, upstream or network failure
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// Error kind for an upstream HTTP status
pub fn classify_status(status: u16) -> ErrorCode {
    match status {
        400 => ErrorCode::InvalidParams,
        401..=499 => ErrorCode::InvalidRequest,
        _ => ErrorCode::InternalError,
    }
}

/// Map any tool failure to a protocol error
pub fn to_mcp_error(error: ToolError) -> McpError {
    match error {
        ToolError::Protocol(err) => err,
        ToolError::Translation(TranslationError::InvalidParams { issues }) => {
            let mut err = McpError::new(ErrorCode::InvalidParams, "Input validation failed");
            // ValidationIssue only holds strings, serialization cannot fail
            if let Ok(details) = serde_json::to_value(issues) {
                err = err.with_data(details);
            }
            err
        }
        ToolError::Translation(TranslationError::ApiError {
            status,
            message,
            body,
        }) => {
            let err = McpError::new(
                classify_status(status),
                format!("DeepL API error ({}): {}", status, message),
            );
            match body {
                Some(body) => err.with_data(body),
                None => err,
            }
        }
        ToolError::Translation(other) => McpError::new(ErrorCode::InternalError, other.to_string()),
    }
}

/// Build the `isError` response for a failure
pub fn normalize(error: ToolError) -> ToolResponse {
    let err = to_mcp_error(error);
    ToolResponse::error(err.code, render(&err.message, err.data.as_ref()))
}

fn render(message: &str, details: Option<&Value>) -> String {
    let mut text = format!("Error: {}", message);
    if let Some(details) = details {
        let details = serde_json::to_string_pretty(details).unwrap_or_else(|_| details.to_string());
        text.push_str("\nDetails: ");
        text.push_str(&details);
    }
    text
}
