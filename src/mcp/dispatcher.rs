//! Routes JSON-RPC methods and tool calls.
//!
//! Tool failures never escape `call_tool`: they come back as `isError`
//! responses. Only malformed `tools/call` envelopes and unknown JSON-RPC
//! methods produce JSON-RPC level errors.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::core::client::DeeplClient;
use crate::mcp::catalog::{self, LIST_LANGUAGES, TRANSLATE_TEXT};
use crate::mcp::handlers;
use crate::mcp::normalize::{normalize, ToolError};
use crate::mcp::protocol::{
    ErrorCode, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, McpError, ToolCallParams,
    ToolDescriptor, ToolResponse, PROTOCOL_VERSION,
};

/// JSON-RPC method names handled by the dispatcher
pub mod methods {
    /// Handshake; returns server info and capabilities
    pub const INITIALIZE: &str = "initialize";
    /// Liveness check
    pub const PING: &str = "ping";
    /// Tool catalog
    pub const TOOLS_LIST: &str = "tools/list";
    /// Tool invocation
    pub const TOOLS_CALL: &str = "tools/call";
}

/// Stateless per call; the client is shared read-only
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: DeeplClient,
}

impl Dispatcher {
    /// Dispatch tool calls to `client`
    pub fn new(client: DeeplClient) -> Self {
        Self { client }
    }

    /// The static tool catalog
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        catalog::tool_descriptors()
    }

    /// Run a tool by exact name; always yields a response
    pub async fn call_tool(&self, name: &str, arguments: &Value) -> ToolResponse {
        info!(tool = name, "Calling tool");

        match self.try_call_tool(name, arguments).await {
            Ok(response) => response,
            Err(e) => {
                warn!(tool = name, error = %e, "Tool call failed");
                normalize(e)
            }
        }
    }

    async fn try_call_tool(&self, name: &str, arguments: &Value) -> Result<ToolResponse, ToolError> {
        match name {
            TRANSLATE_TEXT => handlers::translate(&self.client, arguments).await,
            LIST_LANGUAGES => handlers::list_languages(&self.client, arguments).await,
            _ => Err(McpError::new(ErrorCode::MethodNotFound, format!("Unknown tool: {}", name)).into()),
        }
    }

    /// Answer one JSON-RPC request
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        let result = match request.method.as_str() {
            methods::INITIALIZE => Ok(self.initialize_result()),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => Ok(json!({ "tools": self.list_tools() })),
            methods::TOOLS_CALL => self.handle_tools_call(&request.params).await,
            other => Err(McpError::new(
                ErrorCode::MethodNotFound,
                format!("Method not found: {}", other),
            )),
        };

        match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(Some(id), e),
        }
    }

    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        debug!(method = %notification.method, "Ignoring notification");
    }

    async fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::new(ErrorCode::InvalidParams, "tools/call requires params"))?;
        let params: ToolCallParams = serde_json::from_value(params.clone()).map_err(|e| {
            McpError::new(ErrorCode::InvalidParams, format!("invalid tools/call params: {}", e))
        })?;

        let response = self.call_tool(&params.name, &params.arguments).await;
        serde_json::to_value(response)
            .map_err(|e| McpError::new(ErrorCode::InternalError, e.to_string()))
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": crate::NAME,
                "version": crate::VERSION,
            }
        })
    }
}
