//! MCP server loop over the stdio transport.
//!
//! Requests (lines with an `id`) get exactly one response and notifications
//! get none. Lines that are not JSON (including invalid UTF-8) get a parse
//! error with a null id; JSON that is not a valid request gets an invalid
//! request error carrying the id when it can be recovered.

use serde_json::Value;
use std::future::Future;
use tracing::{debug, error, info, warn};

use crate::mcp::dispatcher::Dispatcher;
use crate::mcp::protocol::{
    ErrorCode, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, McpError, RequestId,
    JSONRPC_VERSION,
};
use crate::server::transport::{StdioTransport, TransportError};

/// Serves the dispatcher's tools over a line-delimited transport
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    dispatcher: Dispatcher,
}

impl<R, W> McpServer<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Create a server reading from and writing to `transport`
    pub fn new(transport: StdioTransport<R, W>, dispatcher: Dispatcher) -> Self {
        Self {
            transport,
            dispatcher,
        }
    }

    /// Serve until the input closes
    pub async fn run(&mut self) -> Result<(), TransportError> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Serve until the input closes or `shutdown` resolves
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<(), TransportError>
    where
        F: Future<Output = ()>,
    {
        info!("MCP server running on stdio");
        tokio::pin!(shutdown);

        loop {
            // Shutdown cancels an in-flight step, dropping its call and any partial reply
            tokio::select! {
                step = self.step() => {
                    if !step? {
                        info!("input closed, shutting down");
                        break;
                    }
                }
                _ = &mut shutdown => {
                    info!("shutdown requested, closing transport");
                    break;
                }
            }
        }

        self.transport.close().await
    }

    /// Handle one line; `false` on EOF
    async fn step(&mut self) -> Result<bool, TransportError> {
        let line = match self.transport.read_line().await? {
            Some(line) if line.is_empty() => return Ok(true),
            Some(line) => line,
            None => return Ok(false),
        };

        if let Some(response) = self.handle_line(&line).await {
            self.write_response(&response).await?;
        }
        Ok(true)
    }

    async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_slice(line) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                return Some(JsonRpcResponse::error(
                    None,
                    McpError::new(ErrorCode::ParseError, format!("Parse error: {}", e)),
                ));
            }
        };

        let raw_id = match message.as_object() {
            Some(object) => object.get("id").cloned(),
            None => return Some(invalid_request(None, "message must be a JSON object")),
        };

        // No `id` member means a notification, which is never answered
        let Some(raw_id) = raw_id else {
            match serde_json::from_value::<JsonRpcNotification>(message) {
                Ok(notification) if notification.jsonrpc == JSONRPC_VERSION => {
                    debug!(method = %notification.method, "received notification");
                    self.dispatcher.handle_notification(&notification);
                }
                Ok(notification) => {
                    warn!(version = %notification.jsonrpc, "ignoring notification with unsupported jsonrpc version");
                }
                Err(e) => warn!(error = %e, "ignoring malformed notification"),
            }
            return None;
        };

        let id = serde_json::from_value::<RequestId>(raw_id).ok();
        let request = match serde_json::from_value::<JsonRpcRequest>(message) {
            Ok(request) => request,
            Err(e) => return Some(invalid_request(id, format!("Invalid request: {}", e))),
        };
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(invalid_request(
                Some(request.id),
                format!("unsupported jsonrpc version \"{}\"", request.jsonrpc),
            ));
        }

        debug!(method = %request.method, id = ?request.id, "received request");
        Some(self.dispatcher.handle_request(&request).await)
    }

    async fn write_response(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError> {
        match response.to_json() {
            Ok(json) => self.transport.write_line(&json).await,
            Err(e) => {
                error!(error = %e, "failed to serialize response");
                Err(TransportError::Write(e.to_string()))
            }
        }
    }

    /// Give back the transport, e.g. to inspect what was written
    pub fn into_transport(self) -> StdioTransport<R, W> {
        self.transport
    }
}

fn invalid_request(id: Option<RequestId>, message: impl Into<String>) -> JsonRpcResponse {
    warn!(id = ?id, "rejecting invalid JSON-RPC request");
    JsonRpcResponse::error(id, McpError::new(ErrorCode::InvalidRequest, message))
}
