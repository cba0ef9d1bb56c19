//! Location resolution
//!
//! Free text is resolved with a precise place lookup first and a general
//! address geocode as fallback.

use tracing::debug;

use crate::error::{MapsError, Result};
use crate::provider::ArcMapsProvider;
use crate::types::{Location, PreciseLocation};

/// Resolves free-text queries to locations
#[derive(Clone)]
pub struct LocationResolver {
    provider: ArcMapsProvider,
}

impl LocationResolver {
    pub fn new(provider: ArcMapsProvider) -> Self {
        Self { provider }
    }

    /// Resolve `query` to a location
    ///
    /// Any failure is wrapped so the message names the query.
    pub async fn resolve(&self, query: &str) -> Result<Location> {
        self.lookup(query)
            .await
            .map_err(|e| MapsError::resolution(query, e))
    }

    async fn lookup(&self, query: &str) -> Result<Location> {
        let candidates = self.provider.find_place(query).await?;

        if let Some(candidate) = candidates.into_iter().next() {
            if let Some(coordinates) = candidate.location {
                debug!("Resolved '{}' via place lookup", query);
                let address = candidate
                    .formatted_address
                    .unwrap_or_else(|| query.to_string());
                return Ok(Location::from_coordinates(coordinates, address));
            }
        }

        let result = self
            .provider
            .geocode(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::LocationNotFound(query.to_string()))?;

        debug!("Resolved '{}' via geocoding", query);
        Ok(Location::from_coordinates(
            result.location,
            result.formatted_address,
        ))
    }

    /// Look up a specific business or place, optionally within an area
    ///
    /// Uses the place lookup only; there is no geocoding fallback.
    pub async fn resolve_precise(&self, query: &str, area: Option<&str>) -> Result<PreciseLocation> {
        let search = match area {
            Some(area) => format!("{query} {area}"),
            None => query.to_string(),
        };

        let candidate = self
            .provider
            .find_place(&search)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::PreciseLocationNotFound(query.to_string()))?;

        let coordinates = candidate
            .location
            .ok_or_else(|| MapsError::MissingCoordinates(query.to_string()))?;

        Ok(PreciseLocation {
            lat: coordinates.lat,
            lng: coordinates.lng,
            address: candidate
                .formatted_address
                .unwrap_or_else(|| query.to_string()),
            name: candidate.name.unwrap_or_else(|| query.to_string()),
            place_id: candidate.place_id,
            types: candidate.types,
        })
    }
}
