//! Tool registry for managing available tools

use crate::Tool;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;
use trip_core::{Error, Result};

/// Registry for managing tools
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self {
            tools: RwLock::new(HashMap::new()),
        }
    }
}

impl ToolRegistry {
    /// Create a new tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().unwrap_or_else(PoisonError::into_inner);
        debug!("Registering tool: {}", tool.name());
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.get(name).cloned()
    }

    /// List all registered tools, ordered by name
    pub fn list_tools(&self) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        let mut listed: Vec<_> = tools.values().cloned().collect();
        listed.sort_by(|a, b| a.name().cmp(b.name()));
        listed
    }

    /// Dispatch a call to the named tool
    ///
    /// An unregistered name yields `Error::UnknownTool`; everything else is
    /// whatever the tool itself returns.
    pub async fn call(&self, name: &str, params: Value) -> Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        tool.execute(params).await
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        let tools = self.tools.read().unwrap_or_else(PoisonError::into_inner);
        tools.is_empty()
    }
}
