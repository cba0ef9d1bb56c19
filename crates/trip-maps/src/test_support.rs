//! Deterministic in-memory provider for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{MapsError, Result};
use crate::provider::MapsProvider;
use crate::types::{
    DirectionsRequest, DirectionsRoute, GeocodeResult, LatLng, Location, PlaceCandidate, RouteLeg,
};

/// A provider call, recorded in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FindPlace(String),
    Geocode(String),
    Directions(DirectionsRequest),
}

/// Table-driven provider
///
/// Places and geocodes are keyed by query text. Legs are keyed by the
/// `(from, to)` address pair; a missing pair fails with `NoRoute`.
#[derive(Default)]
pub struct FakeProvider {
    places: HashMap<String, Vec<PlaceCandidate>>,
    geocodes: HashMap<String, Vec<GeocodeResult>>,
    legs: HashMap<(String, String), RouteLeg>,
    waypoint_order: Option<Vec<usize>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `query` as a place with coordinates and an address
    pub fn with_place(mut self, query: &str, lat: f64, lng: f64, address: &str) -> Self {
        self.places.insert(
            query.to_string(),
            vec![PlaceCandidate {
                name: Some(query.to_string()),
                formatted_address: Some(address.to_string()),
                location: Some(LatLng { lat, lng }),
                place_id: Some(format!("place-{query}")),
                types: vec!["locality".to_string()],
            }],
        );
        self
    }

    pub fn with_place_candidates(mut self, query: &str, candidates: Vec<PlaceCandidate>) -> Self {
        self.places.insert(query.to_string(), candidates);
        self
    }

    pub fn with_geocode(mut self, query: &str, lat: f64, lng: f64, address: &str) -> Self {
        self.geocodes.insert(
            query.to_string(),
            vec![GeocodeResult {
                formatted_address: address.to_string(),
                location: LatLng { lat, lng },
            }],
        );
        self
    }

    /// Register a one-way leg between two addresses
    pub fn with_leg(mut self, from: &str, to: &str, distance_meters: u64, duration_seconds: u64) -> Self {
        self.legs.insert(
            (from.to_string(), to.to_string()),
            RouteLeg {
                distance_meters,
                duration_seconds,
            },
        );
        self
    }

    /// Register a leg in both directions
    pub fn with_edge(self, a: &str, b: &str, distance_meters: u64, duration_seconds: u64) -> Self {
        self.with_leg(a, b, distance_meters, duration_seconds)
            .with_leg(b, a, distance_meters, duration_seconds)
    }

    /// Waypoint order to report when optimization is requested
    pub fn with_waypoint_order(mut self, order: Vec<usize>) -> Self {
        self.waypoint_order = Some(order);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn directions_calls(&self) -> Vec<DirectionsRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Directions(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn leg(&self, from: &Location, to: &Location) -> Result<RouteLeg> {
        self.legs
            .get(&(from.address.clone(), to.address.clone()))
            .copied()
            .ok_or(MapsError::NoRoute)
    }
}

#[async_trait]
impl MapsProvider for FakeProvider {
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        self.record(Call::FindPlace(query.to_string()));
        Ok(self.places.get(query).cloned().unwrap_or_default())
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>> {
        self.record(Call::Geocode(address.to_string()));
        Ok(self.geocodes.get(address).cloned().unwrap_or_default())
    }

    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsRoute> {
        self.record(Call::Directions(request.clone()));

        let mut points = vec![&request.origin];
        points.extend(request.waypoints.iter().map(|wp| &wp.location));
        points.push(&request.destination);

        let legs = points
            .windows(2)
            .map(|pair| self.leg(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;

        let waypoint_order = match (&self.waypoint_order, request.optimize_waypoints) {
            (Some(order), true) => order.clone(),
            _ => (0..request.waypoints.len()).collect(),
        };

        Ok(DirectionsRoute {
            legs,
            waypoint_order,
        })
    }
}

/// Shorthand for a located point named by its address
pub fn loc(address: &str, lat: f64, lng: f64) -> Location {
    Location::new(lat, lng, address)
}
