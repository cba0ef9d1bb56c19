//! Tool for finding the fastest order to visit a set of stops

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use trip_tools::Tool;

use super::{parse_params, tool_output};
use crate::optimizer::DEFAULT_MAX_PERMUTATIONS;
use crate::planner::TripPlanner;

/// Upper bound on orderings a caller may ask for
pub const MAX_PERMUTATIONS_LIMIT: usize = 1000;

pub struct OptimizeRouteTool {
    planner: Arc<TripPlanner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeRouteParams {
    origin: String,
    destination: String,
    waypoints: Vec<String>,
    #[serde(default)]
    max_permutations: Option<f64>,
}

impl OptimizeRouteTool {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner }
    }
}

/// Clamp a caller-supplied cap to `1..=MAX_PERMUTATIONS_LIMIT`
fn permutation_cap(requested: Option<f64>) -> usize {
    match requested {
        Some(n) if !n.is_nan() => n.clamp(1.0, MAX_PERMUTATIONS_LIMIT as f64) as usize,
        _ => DEFAULT_MAX_PERMUTATIONS,
    }
}

#[async_trait]
impl Tool for OptimizeRouteTool {
    async fn execute(&self, params: Value) -> trip_core::Result<Value> {
        let params: OptimizeRouteParams = parse_params(params)?;
        let result = self
            .planner
            .optimize_route(
                &params.origin,
                &params.destination,
                &params.waypoints,
                permutation_cap(params.max_permutations),
            )
            .await;

        tool_output("Error optimizing route: ", result)
    }

    fn name(&self) -> &'static str {
        "optimize_route"
    }

    fn description(&self) -> &'static str {
        "Find the fastest order to visit a set of stops between a fixed origin and destination \
         by testing waypoint orderings. Large stop lists are searched only up to maxPermutations \
         orderings, so the result may not be the global optimum."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Starting location"
                },
                "destination": {
                    "type": "string",
                    "description": "Final location"
                },
                "waypoints": {
                    "type": "array",
                    "description": "Stops to visit in any order",
                    "items": { "type": "string" }
                },
                "maxPermutations": {
                    "type": "number",
                    "description": "Maximum number of orderings to test",
                    "default": DEFAULT_MAX_PERMUTATIONS,
                    "minimum": 1,
                    "maximum": MAX_PERMUTATIONS_LIMIT
                }
            },
            "required": ["origin", "destination", "waypoints"]
        })
    }
}
