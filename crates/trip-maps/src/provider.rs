//! The mapping provider capability
//!
//! Everything above this trait (resolver, optimizer, planner) only talks to
//! a `MapsProvider`, so it can run against a deterministic fake in tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{DirectionsRequest, DirectionsRoute, GeocodeResult, PlaceCandidate};

/// External mapping service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Precise place lookup by free text
    ///
    /// An empty list means nothing matched.
    async fn find_place(&self, query: &str) -> Result<Vec<PlaceCandidate>>;

    /// General address geocoding by free text
    ///
    /// An empty list means nothing matched.
    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>>;

    /// Directions for the request's ordered points
    ///
    /// Returns the first route; `MapsError::NoRoute` when there is none.
    async fn directions(&self, request: &DirectionsRequest) -> Result<DirectionsRoute>;
}

/// Type alias for Arc-wrapped provider
pub type ArcMapsProvider = Arc<dyn MapsProvider>;
