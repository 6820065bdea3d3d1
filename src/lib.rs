//! DeepL MCP Server - exposes DeepL translation as MCP tools
//!
//! This library provides an async DeepL client, the `translate_text` and
//! `list_languages` tool handlers, and a line-delimited JSON-RPC server
//! that serves them over stdio.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod mcp;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::DeeplClient,
    config::DeeplConfig,
    errors::{TranslationError, ValidationIssue},
    models::{LanguageDescriptor, LanguageListRequest, LanguageType, TranslateRequest, TranslationResult},
};

pub use mcp::{
    dispatcher::Dispatcher,
    normalize::ToolError,
    protocol::{ContentBlock, ErrorCode, McpError, ToolResponse},
};

pub use server::{stdio::McpServer, transport::StdioTransport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
