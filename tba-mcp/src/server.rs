//! MCP server implementation.
//!
//! The server owns the TBA client and dispatches tool calls through a
//! single generic pipeline: look the operation up in the catalogue,
//! validate the arguments, derive the upstream path, fetch, validate the
//! response body, and package the result. Every per-call failure except
//! an unknown tool name is converted into an error-flagged tool result so
//! one failing call never destabilises the server.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::catalog::{self, Operation};
use crate::client::{ClientError, TbaClient};
use crate::schema::ValidationError;
use crate::types::{
    McpError, McpResponse, RequestId, ServerCapabilities, ServerInfo, ToolCall,
    ToolCapabilities, ToolDefinition, ToolResult,
};

/// MCP protocol version implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server error types.
///
/// These surface as JSON-RPC errors; they reflect caller contract
/// violations rather than runtime failures of a known tool.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Tool name not present in the catalogue.
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),
}

/// A per-call failure converted into an error-flagged tool result.
#[derive(Debug, Error)]
enum DispatchError {
    #[error("invalid arguments for {tool}: {source}")]
    Arguments {
        tool: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Upstream(#[from] ClientError),

    #[error("response for {tool} did not match the expected shape: {source}")]
    Response {
        tool: &'static str,
        #[source]
        source: ValidationError,
    },
}

/// MCP server for The Blue Alliance API.
pub struct McpServer {
    /// Server info.
    info: ServerInfo,

    /// Server capabilities.
    capabilities: ServerCapabilities,

    /// Upstream HTTP gateway.
    client: TbaClient,
}

impl McpServer {
    /// Create a new MCP server around a TBA client.
    pub fn new(client: TbaClient) -> Self {
        Self {
            info: ServerInfo {
                name: "tba-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolCapabilities {
                    list_changed: false,
                }),
            },
            client,
        }
    }

    /// Get all tool definitions, in catalogue order.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        catalog::OPERATIONS.iter().map(|op| op.definition()).collect()
    }

    /// Execute a tool.
    ///
    /// An unknown name is an `Err`; every other failure is an
    /// error-flagged `ToolResult` whose text starts with `Error: `.
    #[instrument(skip(self, args), fields(tool = name))]
    pub async fn call_tool(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> Result<ToolResult, ServerError> {
        let op =
            catalog::find(name).ok_or_else(|| ServerError::ToolNotFound(name.to_string()))?;

        match self.dispatch(op, args).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(tool = op.name, error = %e, "tool call failed");
                Ok(ToolResult::error(format!("Error: {}", e)))
            }
        }
    }

    /// The uniform request/validate/respond pipeline shared by every
    /// operation in the catalogue.
    async fn dispatch(
        &self,
        op: &Operation,
        args: &Map<String, Value>,
    ) -> Result<ToolResult, DispatchError> {
        let segments = op
            .validate_args(args)
            .map_err(|source| DispatchError::Arguments {
                tool: op.name,
                source,
            })?;
        let path = op.resolve_path(&segments);

        let body = self.client.fetch_json(&path).await?;

        op.output
            .validate(&body)
            .map_err(|source| DispatchError::Response {
                tool: op.name,
                source,
            })?;

        Ok(ToolResult::json(&body))
    }

    /// Handle a JSON-RPC request addressed to this server.
    pub async fn handle_request(
        &self,
        id: RequestId,
        method: &str,
        params: Option<Value>,
    ) -> McpResponse {
        match method {
            "initialize" => self.handle_initialize(id),
            "ping" => McpResponse::success(id, serde_json::json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, params).await,
            _ => McpResponse::error(id, McpError::method_not_found(method)),
        }
    }

    /// Handle a JSON-RPC notification. Nothing requires action here.
    pub fn handle_notification(&self, method: &str) {
        debug!(method, "ignoring notification");
    }

    fn handle_initialize(&self, id: RequestId) -> McpResponse {
        McpResponse::success(
            id,
            serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": self.capabilities,
                "serverInfo": self.info
            }),
        )
    }

    fn handle_tools_list(&self, id: RequestId) -> McpResponse {
        let tools = self.list_tools();
        McpResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, id: RequestId, params: Option<Value>) -> McpResponse {
        let params = match params {
            Some(p) => p,
            None => return McpResponse::error(id, McpError::invalid_params("Missing params")),
        };

        let call: ToolCall = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => return McpResponse::error(id, McpError::invalid_params(e.to_string())),
        };

        let args = match call.arguments {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return McpResponse::error(
                    id,
                    McpError::invalid_params("tool arguments must be an object"),
                )
            }
        };

        match self.call_tool(&call.name, &args).await {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(value) => McpResponse::success(id, value),
                Err(e) => McpResponse::error(id, McpError::internal_error(e.to_string())),
            },
            Err(e) => McpResponse::error(id, McpError::invalid_params(e.to_string())),
        }
    }

    /// Get server info.
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Get server capabilities.
    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }
}
