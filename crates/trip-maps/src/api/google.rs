//! Google Maps web services client
//!
//! Covers the three endpoints trip planning needs: Find Place, Geocoding and
//! Directions. Every request carries the configured key and waits on a
//! client-side rate limiter first.

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

use crate::config::MapsConfig;
use crate::error::{MapsError, Result};
use crate::provider::MapsProvider;
use crate::types::{
    DirectionsRequest, DirectionsRoute, GeocodeResult, LatLng, PlaceCandidate, RouteLeg,
};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const FIND_PLACE_PATH: &str = "place/findplacefromtext/json";
const GEOCODE_PATH: &str = "geocode/json";
const DIRECTIONS_PATH: &str = "directions/json";

const PLACE_FIELDS: &str = "formatted_address,geometry,name,place_id,types";

/// Google Maps API client
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    config: MapsConfig,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct FindPlaceResponse {
    #[serde(default)]
    candidates: Vec<PlaceCandidateDto>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceCandidateDto {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResultDto>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResultDto {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<RouteDto>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    #[serde(default)]
    legs: Vec<LegDto>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct LegDto {
    distance: ValueDto,
    duration: ValueDto,
}

#[derive(Debug, Deserialize)]
struct ValueDto {
    value: u64,
}

impl From<PlaceCandidateDto> for PlaceCandidate {
    fn from(dto: PlaceCandidateDto) -> Self {
        Self {
            name: dto.name,
            formatted_address: dto.formatted_address,
            location: dto.geometry.map(|g| g.location),
            place_id: dto.place_id,
            types: dto.types,
        }
    }
}

impl From<GeocodeResultDto> for GeocodeResult {
    fn from(dto: GeocodeResultDto) -> Self {
        Self {
            formatted_address: dto.formatted_address,
            location: dto.geometry.location,
        }
    }
}

impl From<RouteDto> for DirectionsRoute {
    fn from(dto: RouteDto) -> Self {
        Self {
            legs: dto
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    distance_meters: leg.distance.value,
                    duration_seconds: leg.duration.value,
                })
                .collect(),
            waypoint_order: dto.waypoint_order,
        }
    }
}

/// `OK` and `ZERO_RESULTS` are answers; every other status is a failure
fn check_status(status: &str, error_message: Option<String>) -> Result<()> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(MapsError::ProviderError {
            status: other.to_string(),
            message: error_message.unwrap_or_else(|| "no error message".to_string()),
        }),
    }
}

/// Encode waypoints in the Directions API `waypoints` parameter form
///
/// Non-stopover points are sent as `via:` hints.
fn waypoints_param(request: &DirectionsRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let points = request
        .waypoints
        .iter()
        .map(|wp| {
            if wp.stopover {
                wp.location.to_query()
            } else {
                format!("via:{}", wp.location.to_query())
            }
        })
        .collect::<Vec<_>>()
        .join("|");

    if request.optimize_waypoints {
        Some(format!("optimize:true|{points}"))
    } else {
        Some(points)
    }
}

impl GoogleMapsClient {
    /// Create a new client from a validated configuration
    pub fn new(config: MapsConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        debug!("GET {}", path);

        let response = self
            .client
            .get(self.endpoint(path))
            .query(params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MapsError::ProviderError {
                status: response.status().to_string(),
                message: format!("HTTP error from {path}"),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let params = [
            ("input", query.to_string()),
            ("inputtype", "textquery".to_string()),
            ("fields", PLACE_FIELDS.to_string()),
        ];

        let response: FindPlaceResponse = self.get_json(FIND_PLACE_PATH, &params).await?;
        check_status(&response.status, response.error_message)?;

        Ok(response
            .candidates
            .into_iter()
            .map(PlaceCandidate::from)
            .collect())
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>> {
        let params = [("address", address.to_string())];

        let response: GeocodeResponse = self.get_json(GEOCODE_PATH, &params).await?;
        check_status(&response.status, response.error_message)?;

        Ok(response
            .results
            .into_iter()
            .map(GeocodeResult::from)
            .collect())
    }

    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsRoute> {
        let mut params = vec![
            ("origin", request.origin.to_query()),
            ("destination", request.destination.to_query()),
            ("mode", request.mode.as_str().to_string()),
        ];
        if let Some(waypoints) = waypoints_param(request) {
            params.push(("waypoints", waypoints));
        }

        let response: DirectionsResponse = self.get_json(DIRECTIONS_PATH, &params).await?;
        check_status(&response.status, response.error_message)?;

        response
            .routes
            .into_iter()
            .next()
            .map(DirectionsRoute::from)
            .ok_or(MapsError::NoRoute)
    }
}
