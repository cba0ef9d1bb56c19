//! Tool for turning a place name or address into coordinates

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use trip_tools::Tool;

use super::{parse_params, tool_output};
use crate::planner::TripPlanner;

/// Geocode a free-text location
pub struct FindLocationTool {
    planner: Arc<TripPlanner>,
}

#[derive(Debug, Deserialize)]
struct FindLocationParams {
    query: String,
}

impl FindLocationTool {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner }
    }
}

#[async_trait]
impl Tool for FindLocationTool {
    async fn execute(&self, params: Value) -> trip_core::Result<Value> {
        let params: FindLocationParams = parse_params(params)?;
        tool_output("Error: ", self.planner.find_location(&params.query).await)
    }

    fn name(&self) -> &'static str {
        "find_location"
    }

    fn description(&self) -> &'static str {
        "Find the coordinates and formatted address of a location by name or address"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Location name or address (e.g., 'Eiffel Tower', 'Denver, CO')"
                }
            },
            "required": ["query"]
        })
    }
}
