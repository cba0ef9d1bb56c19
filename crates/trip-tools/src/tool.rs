//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use trip_core::Result;

/// A trip-planning operation exposed to MCP clients
///
/// Implementations include place lookup, route planning, distance-constrained
/// stop placement and waypoint ordering. The server lists each tool by name
/// with its description and input schema, then dispatches `tools/call`
/// requests through [`ToolRegistry`](crate::ToolRegistry).
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the operation on the `arguments` object of a `tools/call` request
    ///
    /// Malformed arguments yield `trip_core::Error::InvalidParameters`.
    /// Lookup or routing failures yield `trip_core::Error::ToolFailed`, whose
    /// message is shown to the client as the tool result text.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Name clients call the tool by, e.g. `plan_trip`
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// // Arguments of a place lookup
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "query": { "type": "string", "description": "Place to look up" }
    ///     },
    ///     "required": ["query"]
    /// });
    /// assert_eq!(schema["required"][0], "query");
    /// ```
    fn input_schema(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use trip_core::Error;

    struct FixedStop;

    #[async_trait]
    impl Tool for FixedStop {
        async fn execute(&self, params: Value) -> Result<Value> {
            let query = params["query"]
                .as_str()
                .ok_or_else(|| Error::InvalidParameters("query is required".to_string()))?;
            Ok(json!({ "name": query, "lat": 39.7392, "lng": -104.9903 }))
        }

        fn name(&self) -> &str {
            "find_location"
        }

        fn description(&self) -> &str {
            "Find a place by name"
        }

        fn input_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            })
        }
    }

    #[tokio::test]
    async fn test_tool_behind_trait_object() {
        let tool: Arc<dyn Tool> = Arc::new(FixedStop);

        assert_eq!(tool.name(), "find_location");
        assert_eq!(tool.input_schema()["required"], json!(["query"]));

        let result = tool.execute(json!({ "query": "Denver" })).await.unwrap();
        assert_eq!(result["name"], "Denver");

        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
    }
}
