//! Data model shared by the resolver, the optimizer and the planner

use serde::{Deserialize, Serialize};

/// A bare coordinate pair as returned by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A resolved location
///
/// Produced once by the resolver and passed around by value afterwards; the
/// coordinates are never looked up again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    pub fn new(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            address: address.into(),
        }
    }

    /// Build from provider coordinates
    pub fn from_coordinates(coordinates: LatLng, address: impl Into<String>) -> Self {
        Self::new(coordinates.lat, coordinates.lng, address)
    }

    /// `lat,lng` in the provider's query form
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// An intermediate point of a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: Location,
    /// Forced stop when true, routing hint when false
    #[serde(default = "default_stopover")]
    pub stopover: bool,
}

pub(crate) fn default_stopover() -> bool {
    true
}

impl Waypoint {
    pub fn new(location: Location, stopover: bool) -> Self {
        Self { location, stopover }
    }

    pub fn stopover(location: Location) -> Self {
        Self::new(location, true)
    }
}

/// Candidate returned by a precise place lookup
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceCandidate {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub place_id: Option<String>,
    pub types: Vec<String>,
}

/// Result of a general address geocode
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub location: LatLng,
}

/// Travel mode for directions requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

/// A directions request between two points through ordered waypoints
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Location,
    pub destination: Location,
    pub waypoints: Vec<Waypoint>,
    /// Let the provider reorder the waypoints
    pub optimize_waypoints: bool,
    pub mode: TravelMode,
}

impl DirectionsRequest {
    /// Plain driving directions between two points
    pub fn between(origin: &Location, destination: &Location) -> Self {
        Self {
            origin: origin.clone(),
            destination: destination.clone(),
            waypoints: Vec::new(),
            optimize_waypoints: false,
            mode: TravelMode::Driving,
        }
    }

    /// Driving directions through `waypoints` in the given order
    pub fn through(origin: &Location, destination: &Location, waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints,
            ..Self::between(origin, destination)
        }
    }

    pub fn with_optimized_waypoints(mut self, optimize: bool) -> Self {
        self.optimize_waypoints = optimize;
        self
    }
}

/// One leg of a route, in base units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLeg {
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

/// The first route of a directions response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DirectionsRoute {
    pub legs: Vec<RouteLeg>,
    /// Provider-chosen waypoint order when optimization was requested
    pub waypoint_order: Vec<usize>,
}

impl DirectionsRoute {
    pub fn total_distance_meters(&self) -> u64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.legs.iter().map(|leg| leg.duration_seconds).sum()
    }
}

/// A planned trip as reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub origin: Location,
    pub destination: Location,
    pub waypoints: Vec<Waypoint>,
    pub total_distance: String,
    pub total_duration: String,
    pub google_maps_url: String,
}

/// Precise place lookup result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreciseLocation {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub types: Vec<String>,
}

/// How an optimized plan was obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    pub permutations_tested: usize,
    pub total_permutations: u64,
    pub time_savings: String,
    pub route_order: Vec<String>,
}

/// A trip plan produced by the route optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedTripPlan {
    #[serde(flatten)]
    pub plan: TripPlan,
    pub optimization: OptimizationSummary,
}
