//! Total travel time of a fixed visiting order

use tracing::{debug, warn};

use crate::error::MapsError;
use crate::provider::ArcMapsProvider;
use crate::types::{DirectionsRequest, Location};

/// Seconds charged for a leg whose time could not be fetched
pub const LEG_FAILURE_PENALTY_SECS: u64 = 3600;

/// Sums driving time leg by leg
///
/// A failed leg never aborts the evaluation; it is charged
/// [`LEG_FAILURE_PENALTY_SECS`] so every ordering gets a comparable time.
#[derive(Clone)]
pub struct RouteTimeEvaluator {
    provider: ArcMapsProvider,
}

impl RouteTimeEvaluator {
    pub fn new(provider: ArcMapsProvider) -> Self {
        Self { provider }
    }

    /// Total time in seconds for visiting `route` in order
    ///
    /// Legs are fetched one after another. Fewer than two points cost
    /// nothing and make no provider call.
    pub async fn route_time(&self, route: &[Location]) -> u64 {
        let mut total = 0;

        for pair in route.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            total += match self.leg_time(from, to).await {
                Ok(seconds) => seconds,
                Err(e) => {
                    warn!(
                        from = %from.address,
                        to = %to.address,
                        error = %e,
                        "Leg time unavailable, charging penalty"
                    );
                    LEG_FAILURE_PENALTY_SECS
                }
            };
        }

        debug!("Route of {} points takes {}s", route.len(), total);
        total
    }

    async fn leg_time(&self, from: &Location, to: &Location) -> Result<u64, MapsError> {
        let route = self
            .provider
            .directions(&DirectionsRequest::between(from, to))
            .await?;

        route
            .legs
            .first()
            .map(|leg| leg.duration_seconds)
            .ok_or(MapsError::NoRoute)
    }
}
