//! Tool for planning a trip with waypoints placed by distance from the origin

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use trip_tools::Tool;

use super::{parse_params, tool_output};
use crate::planner::{DistanceWaypointRequest, TripPlanner};

/// Plans stops in ascending order of their stated distance from the origin
pub struct PlanTripWithDistanceConstraintsTool {
    planner: Arc<TripPlanner>,
}

#[derive(Debug, Deserialize)]
struct DistanceConstraintsParams {
    origin: String,
    destination: String,
    waypoints: Vec<DistanceWaypointRequest>,
}

impl PlanTripWithDistanceConstraintsTool {
    pub fn new(planner: Arc<TripPlanner>) -> Self {
        Self { planner }
    }
}

#[async_trait]
impl Tool for PlanTripWithDistanceConstraintsTool {
    async fn execute(&self, params: Value) -> trip_core::Result<Value> {
        let params: DistanceConstraintsParams = parse_params(params)?;
        let result = self
            .planner
            .plan_trip_with_distance_constraints(&params.origin, &params.destination, &params.waypoints)
            .await;

        tool_output("Error planning trip with distance constraints: ", result)
    }

    fn name(&self) -> &'static str {
        "plan_trip_with_distance_constraints"
    }

    fn description(&self) -> &'static str {
        "Plan a trip where each stop is given with its approximate distance from the origin. \
         Stops are visited in ascending order of that distance."
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
                    "description": "Stops with their distance from the origin",
                    "items": {
                        "type": "object",
                        "properties": {
                            "location": { "type": "string" },
                            "distanceFromOrigin": {
                                "type": "number",
                                "description": "Approximate miles from the origin"
                            },
                            "stopover": {
                                "type": "boolean",
                                "default": true
                            }
                        },
                        "required": ["location", "distanceFromOrigin"]
                    }
                }
            },
            "required": ["origin", "destination", "waypoints"]
        })
    }
}
