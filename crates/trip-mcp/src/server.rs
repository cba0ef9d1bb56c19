//! Stdio MCP server
//!
//! Reads line-delimited JSON-RPC 2.0 messages and writes one response line
//! per request. Notifications are handled silently. Tools are dispatched
//! through a [`ToolRegistry`].

use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use trip_tools::ToolRegistry;

use crate::Result;
use crate::error::MCPError;
use crate::protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    MCPServerInfo, MCPToolDefinition, MCPToolResult, PROTOCOL_VERSION,
};

/// MCP server exposing every tool in a registry
pub struct MCPServer {
    registry: Arc<ToolRegistry>,
    info: MCPServerInfo,
}

impl MCPServer {
    /// Create a server that identifies itself as `name`/`version`
    pub fn new(registry: Arc<ToolRegistry>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            registry,
            info: MCPServerInfo {
                name: name.into(),
                version: version.into(),
            },
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve line-delimited JSON-RPC from `reader` to `writer` until EOF
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            "MCP server {} v{} ready with {} tools",
            self.info.name,
            self.info.version,
            self.registry.len()
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let out = serde_json::to_string(&response)?;
                writer.write_all(out.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw line; `None` when no response is due
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparsable message: {}", e);
                let err = MCPError::ParseError(e.to_string());
                return Some(JsonRpcResponse::failure(Value::Null, JsonRpcError::from(&err)));
            }
        };

        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                let err = MCPError::InvalidRequest(e.to_string());
                return Some(JsonRpcResponse::failure(id, JsonRpcError::from(&err)));
            }
        };

        self.handle_request(request).await
    }

    /// Handle a parsed request or notification
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Received {}", request.method);

        let Some(id) = request.id else {
            debug!("Notification {} acknowledged", request.method);
            return None;
        };

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                debug!("{} failed: {}", request.method, e);
                JsonRpcResponse::failure(id, JsonRpcError::from(&e))
            }
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value> {
        match method {
            "initialize" => Ok(serde_json::to_value(InitializeResult {
                protocol_version: PROTOCOL_VERSION,
                capabilities: json!({ "tools": { "listChanged": false } }),
                server_info: self.info.clone(),
            })?),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.tool_definitions() })),
            "tools/call" => {
                let params = params.ok_or_else(|| {
                    MCPError::InvalidParams("tools/call requires params".to_string())
                })?;
                let params: CallToolParams = serde_json::from_value(params)
                    .map_err(|e| MCPError::InvalidParams(e.to_string()))?;
                Ok(serde_json::to_value(self.call_tool(params).await?)?)
            }
            other => Err(MCPError::MethodNotFound(other.to_string())),
        }
    }

    /// Registered tools, sorted by name
    pub fn tool_definitions(&self) -> Vec<MCPToolDefinition> {
        self.registry
            .list_tools()
            .iter()
            .map(|tool| MCPToolDefinition {
                name: tool.name().to_string(),
                description: Some(tool.description().to_string()),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    async fn call_tool(&self, params: CallToolParams) -> Result<MCPToolResult> {
        let arguments = params.arguments.unwrap_or_else(|| json!({}));
        info!("Calling tool {}", params.name);

        match self.registry.call(&params.name, arguments).await {
            Ok(output) => Ok(MCPToolResult::text(serde_json::to_string_pretty(&output)?)),
            Err(e) if e.is_dispatch_error() => Err(MCPError::InvalidParams(e.to_string())),
            Err(e) => {
                warn!("Tool {} failed: {}", params.name, e);
                Ok(MCPToolResult::error(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use trip_tools::Tool;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        async fn execute(&self, params: Value) -> trip_core::Result<Value> {
            Ok(json!({ "echo": params }))
        }

        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "Echo the arguments back"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object", "properties": {} })
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        async fn execute(&self, _params: Value) -> trip_core::Result<Value> {
            Err(trip_core::Error::ToolFailed(
                "Error planning trip: Failed to get route: No route found".to_string(),
            ))
        }

        fn name(&self) -> &'static str {
            "always_fails"
        }

        fn description(&self) -> &'static str {
            "Fails every time"
        }

        fn input_schema(&self) -> Value {
            json!({ "type": "object" })
        }
    }

    fn server() -> MCPServer {
        let registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(FailingTool));
        MCPServer::new(Arc::new(registry), "trip-copilot", "0.1.0")
    }

    async fn roundtrip(server: &MCPServer, request: Value) -> Value {
        let response = server
            .handle_line(&request.to_string())
            .await
            .expect("request should be answered");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = roundtrip(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "test", "version": "1.0" }
                }
            }),
        )
        .await;

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
        assert_eq!(response["result"]["serverInfo"]["name"], "trip-copilot");
        assert_eq!(response["result"]["serverInfo"]["version"], "0.1.0");
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server();
        let line = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string();
        assert!(server.handle_line(&line).await.is_none());
    }

    #[tokio::test]
    async fn test_ping() {
        let response = roundtrip(&server(), json!({ "jsonrpc": "2.0", "id": "p", "method": "ping" })).await;
        assert_eq!(response["id"], "p");
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_tools_list_sorted() {
        let response =
            roundtrip(&server(), json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" })).await;

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "always_fails");
        assert_eq!(tools[1]["name"], "echo");
        assert_eq!(tools[1]["inputSchema"]["type"], "object");
        assert_eq!(tools[1]["description"], "Echo the arguments back");
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let response = roundtrip(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": { "name": "echo", "arguments": { "query": "Paris" } }
            }),
        )
        .await;

        let result = &response["result"];
        assert!(result.get("isError").is_none());
        assert_eq!(result["content"][0]["type"], "text");

        let text = result["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["echo"]["query"], "Paris");
        // Pretty-printed
        assert!(text.contains('\n'));
    }

    #[tokio::test]
    async fn test_tools_call_without_arguments() {
        let response = roundtrip(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": { "name": "echo" }
            }),
        )
        .await;

        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let payload: Value = serde_json::from_str(text).unwrap();
        assert_eq!(payload["echo"], json!({}));
    }

    #[tokio::test]
    async fn test_tool_failure_is_error_content() {
        let response = roundtrip(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": { "name": "always_fails", "arguments": {} }
            }),
        )
        .await;

        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(
            response["result"]["content"][0]["text"],
            "Error planning trip: Failed to get route: No route found"
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let response = roundtrip(
            &server(),
            json!({
                "jsonrpc": "2.0",
                "id": 6,
                "method": "tools/call",
                "params": { "name": "teleport", "arguments": {} }
            }),
        )
        .await;

        assert!(response.get("result").is_none());
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(
            response["error"]["message"],
            "Invalid params: Unknown tool: teleport"
        );
    }

    #[tokio::test]
    async fn test_malformed_call_params() {
        let server = server();

        let response = roundtrip(
            &server,
            json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": { "arguments": {} } }),
        )
        .await;
        assert_eq!(response["error"]["code"], -32602);

        let response =
            roundtrip(&server, json!({ "jsonrpc": "2.0", "id": 8, "method": "tools/call" })).await;
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = roundtrip(
            &server(),
            json!({ "jsonrpc": "2.0", "id": 9, "method": "resources/list" }),
        )
        .await;

        assert_eq!(response["id"], 9);
        assert_eq!(response["error"]["code"], -32601);
        assert_eq!(response["error"]["message"], "Method not found: resources/list");
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = server().handle_line("{not json").await.unwrap();
        let response = serde_json::to_value(response).unwrap();

        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], -32700);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let response = roundtrip(&server(), json!({ "jsonrpc": "2.0", "id": 10 })).await;
        assert_eq!(response["id"], 10);
        assert_eq!(response["error"]["code"], -32600);
    }

    #[test]
    fn test_serve_over_buffers() {
        let input = [
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }).to_string(),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }).to_string(),
            String::new(),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }).to_string(),
            json!({ "jsonrpc": "2.0", "id": 3, "method": "ping" }).to_string(),
        ]
        .join("\n");

        let server = server();
        let mut output = Vec::new();
        tokio_test::block_on(server.serve(input.as_bytes(), &mut output)).unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);
        let ids: Vec<&Value> = responses.iter().map(|r| &r["id"]).collect();
        assert_eq!(ids, vec![&json!(1), &json!(2), &json!(3)]);
    }
}
