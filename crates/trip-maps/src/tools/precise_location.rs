//! Tool for pinpointing a specific business or landmark

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use trip_tools::Tool;

use super::{parse_params, tool_output};
use crate::planner::TripPlanner;

/// Exact place lookup, optionally narrowed to an area
pub struct FindPreciseLocationTool {
    planner: Arc<TripPlanner>,
}

#[derive(Debug, Deserialize)]
struct PreciseLocationParams {
    query: String,
    /// Area hint appended to the search text
    #[serde(default)]
    location: Option<String>,
}

impl FindPreciseLocationTool {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner }
    }
}

#[async_trait]
impl Tool for FindPreciseLocationTool {
    async fn execute(&self, params: Value) -> trip_core::Result<Value> {
        let params: PreciseLocationParams = parse_params(params)?;
        let result = self
            .planner
            .find_precise_location(&params.query, params.location.as_deref())
            .await;

        tool_output("Error finding precise location: ", result)
    }

    fn name(&self) -> &'static str {
        "find_precise_location"
    }

    fn description(&self) -> &'static str {
        "Find the exact location of a business, landmark or point of interest. \
         Returns coordinates, address, name, place ID and place types."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Business or place name (e.g., 'Blue Bottle Coffee')"
                },
                "location": {
                    "type": "string",
                    "description": "Area to search in (e.g., 'Oakland, CA')"
                }
            },
            "required": ["query"]
        })
    }
}
