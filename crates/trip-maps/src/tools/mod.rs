//! Trip planning tools exposed over MCP

pub mod distance_constraints;
pub mod find_location;
pub mod optimize_route;
pub mod plan_trip;
pub mod precise_location;

pub use distance_constraints::PlanTripWithDistanceConstraintsTool;
pub use find_location::FindLocationTool;
pub use optimize_route::OptimizeRouteTool;
pub use plan_trip::PlanTripTool;
pub use precise_location::FindPreciseLocationTool;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use trip_tools::ToolRegistry;

use crate::error::MapsError;
use crate::planner::TripPlanner;

/// Register every trip planning tool against one shared planner
pub fn register_tools(registry: &ToolRegistry, planner: Arc<TripPlanner>) {
    registry.register(Arc::new(FindLocationTool::new(Arc::clone(&planner))));
    registry.register(Arc::new(FindPreciseLocationTool::new(Arc::clone(&planner))));
    registry.register(Arc::new(PlanTripTool::new(Arc::clone(&planner))));
    registry.register(Arc::new(PlanTripWithDistanceConstraintsTool::new(
        Arc::clone(&planner),
    )));
    registry.register(Arc::new(OptimizeRouteTool::new(planner)));
}

fn parse_params<T: DeserializeOwned>(params: Value) -> trip_core::Result<T> {
    Ok(serde_json::from_value(params)?)
}

/// Serialize a tool's result, or prefix its failure for the caller
fn tool_output<T: Serialize>(prefix: &str, result: Result<T, MapsError>) -> trip_core::Result<Value> {
    match result {
        Ok(value) => Ok(serde_json::to_value(value)?),
        Err(e) => Err(trip_core::Error::ToolFailed(format!("{prefix}{e}"))),
    }
}
