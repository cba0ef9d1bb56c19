//! Trip planning on top of Google Maps
//!
//! This crate provides the mapping side of trip-copilot:
//!
//! - Location resolution (place lookup with geocoding fallback)
//! - Whole-trip routing through ordered waypoints
//! - Waypoint-order optimization by capped exhaustive search
//! - Share links and human-readable distance/duration text
//! - The MCP tools that expose all of the above
//!
//! # Architecture
//!
//! Everything that talks to the mapping service goes through the
//! [`MapsProvider`] trait. [`GoogleMapsClient`] implements it over HTTP; tests
//! substitute deterministic fakes. [`TripPlanner`] ties the resolver, the
//! route fetcher and the [`RouteOptimizer`] together and backs each tool.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use trip_maps::{GoogleMapsClient, MapsConfig, TripPlanner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MapsConfig::from_env()?;
//!     let planner = TripPlanner::new(Arc::new(GoogleMapsClient::new(config)?));
//!
//!     let plan = planner
//!         .optimize_route("Boston", "New York", &["Hartford".into(), "Providence".into()], 100)
//!         .await?;
//!     println!("{}", plan.plan.google_maps_url);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod optimizer;
pub mod planner;
pub mod provider;
pub mod resolver;
pub mod tools;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::GoogleMapsClient;
pub use config::MapsConfig;
pub use error::{MapsError, Result};
pub use optimizer::{OptimizationResult, RouteOptimizer};
pub use planner::{DistanceWaypointRequest, TripPlanner, WaypointRequest};
pub use provider::{ArcMapsProvider, MapsProvider};
pub use resolver::LocationResolver;
pub use tools::register_tools;
pub use types::{Location, OptimizedTripPlan, PreciseLocation, TripPlan, Waypoint};
