//! Tool for planning a trip through named waypoints

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use trip_tools::Tool;

use super::{parse_params, tool_output};
use crate::planner::{TripPlanner, WaypointRequest};

pub struct PlanTripTool {
    planner: Arc<TripPlanner>,
}

#[derive(Debug, Deserialize)]
struct PlanTripParams {
    origin: String,
    destination: String,
    #[serde(default)]
    waypoints: Vec<WaypointRequest>,
    #[serde(default)]
    optimize: Option<bool>,
}

impl PlanTripTool {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner }
    }
}

#[async_trait]
impl Tool for PlanTripTool {
    async fn execute(&self, params: Value) -> trip_core::Result<Value> {
        let params: PlanTripParams = parse_params(params)?;
        let result = self
            .planner
            .plan_trip(
                &params.origin,
                &params.destination,
                &params.waypoints,
                params.optimize.unwrap_or(true),
            )
            .await;

        tool_output("Error planning trip: ", result)
    }

    fn name(&self) -> &'static str {
        "plan_trip"
    }

    fn description(&self) -> &'static str {
        "Plan a driving trip from an origin to a destination through optional waypoints. \
         Returns total distance, total duration and a Google Maps link."
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
                    "description": "Intermediate stops",
                    "items": {
                        "type": "object",
                        "properties": {
                            "location": { "type": "string" },
                            "stopover": {
                                "type": "boolean",
                                "description": "Stop here (true) or only route through (false)",
                                "default": true
                            }
                        },
                        "required": ["location"]
                    }
                },
                "optimize": {
                    "type": "boolean",
                    "description": "Let the routing service reorder waypoints",
                    "default": true
                }
            },
            "required": ["origin", "destination"]
        })
    }
}
