//! Stdio transport.
//!
//! Newline-delimited JSON over stdin/stdout: one request per line, one
//! response per line, correlated by JSON-RPC id. Requests without an id
//! are notifications and get no reply. Stdout carries only protocol
//! messages; diagnostics go to stderr via tracing.

use serde_json::Value;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::server::McpServer;
use crate::types::{McpError, McpResponse, RequestId};

/// Serve MCP requests over stdin/stdout until EOF.
pub async fn serve_stdio(server: &McpServer) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(line) {
            Ok(message) => handle_message(server, message).await,
            Err(e) => {
                debug!(error = %e, "received unparseable line");
                Some(McpResponse::error(RequestId::Null, McpError::parse_error()))
            }
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_string(&response)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            payload.push('\n');
            stdout.write_all(payload.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

/// Handle one decoded message; returns None for notifications.
async fn handle_message(server: &McpServer, message: Value) -> Option<McpResponse> {
    let Some(obj) = message.as_object() else {
        return Some(McpResponse::error(
            RequestId::Null,
            McpError::invalid_request("Request must be a JSON object"),
        ));
    };

    if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        let id = request_id(obj.get("id"));
        return Some(McpResponse::error(
            id,
            McpError::invalid_request("jsonrpc must be '2.0'"),
        ));
    }

    let Some(method) = obj.get("method").and_then(Value::as_str) else {
        // A message with no method is a client response; this server
        // issues no outbound requests, so there is nothing to match.
        return None;
    };

    let params = obj.get("params").cloned();
    match obj.get("id") {
        Some(id) => {
            let id = request_id(Some(id));
            Some(server.handle_request(id, method, params).await)
        }
        None => {
            server.handle_notification(method);
            None
        }
    }
}

fn request_id(value: Option<&Value>) -> RequestId {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or(RequestId::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TbaClient;
    use crate::config::Config;
    use serde_json::json;

    fn test_server() -> McpServer {
        McpServer::new(TbaClient::new(Config::new("http://127.0.0.1:9", "key")))
    }

    #[tokio::test]
    async fn test_request_gets_response_with_same_id() {
        let server = test_server();
        let resp = handle_message(
            &server,
            json!({"jsonrpc": "2.0", "id": 42, "method": "tools/list"}),
        )
        .await
        .unwrap();
        assert_eq!(resp.id, RequestId::Number(42));
        assert!(resp.result.is_some());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = test_server();
        let resp = handle_message(
            &server,
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .await;
        assert!(resp.is_none());
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version_is_rejected() {
        let server = test_server();
        let resp = handle_message(
            &server,
            json!({"jsonrpc": "1.0", "id": 1, "method": "tools/list"}),
        )
        .await
        .unwrap();
        assert_eq!(resp.error.unwrap().code, McpError::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_non_object_message_is_rejected() {
        let server = test_server();
        let resp = handle_message(&server, json!([1, 2, 3])).await.unwrap();
        assert_eq!(resp.error.unwrap().code, McpError::INVALID_REQUEST);
    }
}
