//! Trip planning on top of the resolver, the route fetcher and the optimizer
//!
//! Each public method backs one tool. Named places are resolved one at a
//! time (origin, destination, then waypoints in order) and the resolved
//! values are reused as-is for routing.

use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{MapsError, Result};
use crate::format::{format_distance, format_duration, format_time_savings, google_maps_url};
use crate::optimizer::RouteOptimizer;
use crate::provider::ArcMapsProvider;
use crate::resolver::LocationResolver;
use crate::types::{
    DirectionsRequest, Location, OptimizationSummary, OptimizedTripPlan, PreciseLocation, TripPlan,
    Waypoint,
};

/// A waypoint as named by the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WaypointRequest {
    pub location: String,
    #[serde(default)]
    pub stopover: Option<bool>,
}

/// A waypoint placed by approximate distance from the origin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceWaypointRequest {
    pub location: String,
    /// Miles from the origin; only used for ordering
    pub distance_from_origin: f64,
    #[serde(default)]
    pub stopover: Option<bool>,
}

/// Shared logic behind the trip planning tools
#[derive(Clone)]
pub struct TripPlanner {
    provider: ArcMapsProvider,
    resolver: LocationResolver,
    optimizer: RouteOptimizer,
}

impl TripPlanner {
    pub fn new(provider: ArcMapsProvider) -> Self {
        Self {
            resolver: LocationResolver::new(Arc::clone(&provider)),
            optimizer: RouteOptimizer::new(Arc::clone(&provider)),
            provider,
        }
    }

    /// Coordinates and formatted address for a free-text location
    pub async fn find_location(&self, query: &str) -> Result<Location> {
        self.resolver.resolve(query).await
    }

    /// Exact place lookup for a business or landmark
    pub async fn find_precise_location(&self, query: &str, area: Option<&str>) -> Result<PreciseLocation> {
        self.resolver.resolve_precise(query, area).await
    }

    /// Plan a trip through named waypoints
    ///
    /// With `optimize` the provider may reorder the waypoints; the plan
    /// reports them in the order actually driven.
    pub async fn plan_trip(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[WaypointRequest],
        optimize: bool,
    ) -> Result<TripPlan> {
        let origin = self.resolver.resolve(origin).await?;
        let destination = self.resolver.resolve(destination).await?;

        let mut resolved = Vec::with_capacity(waypoints.len());
        for wp in waypoints {
            let location = self.resolver.resolve(&wp.location).await?;
            resolved.push(Waypoint::new(location, wp.stopover.unwrap_or(true)));
        }

        self.route_plan(origin, destination, resolved, optimize).await
    }

    /// Plan a trip whose waypoints are ordered by distance from the origin
    ///
    /// Waypoints are sorted ascending by `distance_from_origin` before
    /// anything is resolved or routed, and the provider is not allowed to
    /// reorder them.
    pub async fn plan_trip_with_distance_constraints(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[DistanceWaypointRequest],
    ) -> Result<TripPlan> {
        let origin = self.resolver.resolve(origin).await?;
        let destination = self.resolver.resolve(destination).await?;

        let mut sorted = waypoints.to_vec();
        sorted.sort_by(|a, b| a.distance_from_origin.total_cmp(&b.distance_from_origin));

        let mut resolved = Vec::with_capacity(sorted.len());
        for wp in &sorted {
            let location = self.resolver.resolve(&wp.location).await?;
            resolved.push(Waypoint::new(location, wp.stopover.unwrap_or(true)));
        }

        self.route_plan(origin, destination, resolved, false).await
    }

    /// Find the fastest visiting order of the waypoints and plan it
    pub async fn optimize_route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        max_permutations: usize,
    ) -> Result<OptimizedTripPlan> {
        info!("Starting route optimization for {} waypoints", waypoints.len());

        let origin = self.resolver.resolve(origin).await?;
        let destination = self.resolver.resolve(destination).await?;

        let mut resolved = Vec::with_capacity(waypoints.len());
        for wp in waypoints {
            resolved.push(self.resolver.resolve(wp).await?);
        }

        let result = self
            .optimizer
            .optimize(&origin, &destination, &resolved, max_permutations)
            .await;

        let total_distance = self.route_distance(result.optimal_route()).await?;

        let optimal_waypoints: Vec<Waypoint> = result
            .optimal_waypoints()
            .iter()
            .cloned()
            .map(Waypoint::stopover)
            .collect();

        let optimization = OptimizationSummary {
            permutations_tested: result.permutations_tested(),
            total_permutations: result.total_permutations,
            time_savings: format_time_savings(result.time_saved(), result.permutations_tested()),
            route_order: result
                .optimal_route()
                .iter()
                .map(|l| l.address.clone())
                .collect(),
        };

        let plan = TripPlan {
            google_maps_url: google_maps_url(&origin, &destination, &optimal_waypoints),
            total_distance: format_distance(total_distance),
            total_duration: format_duration(result.total_time()),
            origin,
            destination,
            waypoints: optimal_waypoints,
        };

        Ok(OptimizedTripPlan { plan, optimization })
    }

    async fn route_plan(
        &self,
        origin: Location,
        destination: Location,
        waypoints: Vec<Waypoint>,
        optimize: bool,
    ) -> Result<TripPlan> {
        let request = DirectionsRequest::through(&origin, &destination, waypoints.clone())
            .with_optimized_waypoints(optimize);

        let route = self
            .provider
            .directions(&request)
            .await
            .map_err(|e| MapsError::RouteFailed(Box::new(e)))?;

        let waypoints = if optimize {
            apply_waypoint_order(waypoints, &route.waypoint_order)
        } else {
            waypoints
        };

        Ok(TripPlan {
            total_distance: format_distance(route.total_distance_meters()),
            total_duration: format_duration(route.total_duration_seconds()),
            google_maps_url: google_maps_url(&origin, &destination, &waypoints),
            origin,
            destination,
            waypoints,
        })
    }

    /// Driving distance along `route`, leg by leg
    ///
    /// A leg without a route adds nothing; any other failure propagates.
    async fn route_distance(&self, route: &[Location]) -> Result<u64> {
        let mut total = 0;

        for pair in route.windows(2) {
            match self
                .provider
                .directions(&DirectionsRequest::between(&pair[0], &pair[1]))
                .await
            {
                Ok(directions) => {
                    total += directions.legs.first().map_or(0, |leg| leg.distance_meters);
                }
                Err(MapsError::NoRoute) => {
                    warn!(
                        "No route between {} and {}, distance not counted",
                        pair[0].address, pair[1].address
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(total)
    }
}

/// Reorder waypoints by the provider's `waypoint_order`
///
/// An order that is not a permutation of the waypoint positions is ignored.
fn apply_waypoint_order(waypoints: Vec<Waypoint>, order: &[usize]) -> Vec<Waypoint> {
    let mut seen = vec![false; waypoints.len()];
    let valid = order.len() == waypoints.len()
        && order
            .iter()
            .all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true));

    if !valid {
        if !order.is_empty() {
            warn!("Ignoring invalid waypoint order {:?}", order);
        }
        return waypoints;
    }

    order.iter().map(|&i| waypoints[i].clone()).collect()
}
