//! # tba-mcp
//!
//! An MCP (Model Context Protocol) server for The Blue Alliance API v3,
//! exposing the read-only endpoints of the FIRST Robotics Competition
//! statistics service as schema-described tools for AI assistants.
//!
//! ## Overview
//!
//! Every tool follows the same request/validate/respond pipeline:
//!
//! 1. Look the tool name up in the static operation catalogue
//! 2. Validate the caller's arguments against the declared input shape
//! 3. Substitute the validated values into the upstream path template
//! 4. GET the path from the TBA API with the configured key
//! 5. Validate the response body against the declared entity shape
//! 6. Return the body as indented JSON text
//!
//! The catalogue ([`catalog::OPERATIONS`]) is a single data-driven table
//! consumed by both tool discovery and dispatch, so the advertised tools
//! and the dispatchable set are the same thing by construction.
//!
//! ## Supported methods
//!
//! - `initialize`: initialize the MCP session
//! - `ping`: liveness probe
//! - `tools/list`: list available tools
//! - `tools/call`: execute a tool
//!
//! ## Configuration
//!
//! The server requires the `TBA_API_KEY` environment variable (an API key
//! from <https://www.thebluealliance.com/account>) and exits at startup if
//! it is missing or blank. `TBA_API_URL` and `TBA_TIMEOUT_SECS` override
//! the upstream base URL and the request timeout.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tba_mcp::{Config, McpServer, TbaClient};
//!
//! async fn setup() -> Result<(), tba_mcp::ConfigError> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(TbaClient::new(config));
//!
//!     let tools = server.list_tools();
//!     println!("Serving {} tools", tools.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod entities;
pub mod schema;
pub mod server;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientError, TbaClient};
pub use config::{Config, ConfigError};
pub use entities::Entity;
pub use schema::{Field, Shape, ValidationError};
pub use server::{McpServer, ServerError};
pub use types::{
    ContentBlock, McpError, McpRequest, McpResponse, RequestId, ServerCapabilities, ServerInfo,
    ToolCall, ToolCapabilities, ToolDefinition, ToolResult,
};
