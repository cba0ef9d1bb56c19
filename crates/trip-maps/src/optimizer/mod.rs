//! Waypoint-order optimization
//!
//! Exhaustive search over waypoint orderings, capped: the first
//! `max_permutations` orderings of the deterministic enumeration are each
//! timed leg by leg, one after another, and the fastest wins. When the cap
//! binds, the answer is only the best of the prefix that was tested; the
//! result always reports tested vs total so callers can see that.

pub mod evaluator;
pub mod permutations;

use serde::Serialize;
use tracing::info;

use crate::provider::ArcMapsProvider;
use crate::types::Location;

pub use evaluator::{LEG_FAILURE_PENALTY_SECS, RouteTimeEvaluator};
pub use permutations::{Permutations, permutation_count, permutations};

/// Orderings evaluated when the caller does not say
pub const DEFAULT_MAX_PERMUTATIONS: usize = 100;

/// One evaluated ordering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCandidate {
    /// Origin, waypoints in this ordering, destination
    pub route: Vec<Location>,
    /// Total travel time in seconds
    pub time: u64,
    /// Position in the enumeration order
    pub rank: usize,
}

/// Outcome of an optimization run
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Every evaluated candidate, fastest first
    pub candidates: Vec<RouteCandidate>,
    /// `n!` for the waypoint count, saturating
    pub total_permutations: u64,
}

impl OptimizationResult {
    /// The fastest candidate
    pub fn best(&self) -> &RouteCandidate {
        // At least one ordering is always evaluated
        &self.candidates[0]
    }

    /// The slowest candidate
    pub fn worst(&self) -> &RouteCandidate {
        &self.candidates[self.candidates.len() - 1]
    }

    /// Best full ordering, origin to destination
    pub fn optimal_route(&self) -> &[Location] {
        &self.best().route
    }

    /// Best total time in seconds
    pub fn total_time(&self) -> u64 {
        self.best().time
    }

    /// The best ordering without origin and destination
    pub fn optimal_waypoints(&self) -> &[Location] {
        let route = self.optimal_route();
        &route[1..route.len() - 1]
    }

    pub fn permutations_tested(&self) -> usize {
        self.candidates.len()
    }

    /// Seconds saved by the best ordering over the worst one tested
    pub fn time_saved(&self) -> u64 {
        self.worst().time - self.best().time
    }
}

/// Capped exhaustive waypoint-order search
#[derive(Clone)]
pub struct RouteOptimizer {
    evaluator: RouteTimeEvaluator,
}

impl RouteOptimizer {
    pub fn new(provider: ArcMapsProvider) -> Self {
        Self {
            evaluator: RouteTimeEvaluator::new(provider),
        }
    }

    /// Find the fastest visiting order of `waypoints` between two fixed ends
    ///
    /// Evaluates the first `max_permutations` orderings (at least one) in
    /// enumeration order. Ties go to the ordering enumerated first.
    pub async fn optimize(
        &self,
        origin: &Location,
        destination: &Location,
        waypoints: &[Location],
        max_permutations: usize,
    ) -> OptimizationResult {
        let total_permutations = permutation_count(waypoints.len());
        let cap = max_permutations.max(1);

        info!(
            "Testing up to {} of {} route permutations for {} waypoints",
            cap,
            total_permutations,
            waypoints.len()
        );

        let mut candidates = Vec::new();
        for (rank, ordering) in permutations(waypoints).take(cap).enumerate() {
            let mut route = Vec::with_capacity(ordering.len() + 2);
            route.push(origin.clone());
            route.extend(ordering);
            route.push(destination.clone());

            let time = self.evaluator.route_time(&route).await;
            candidates.push(RouteCandidate { route, time, rank });
        }

        candidates.sort_by_key(|candidate| (candidate.time, candidate.rank));

        info!(
            "Tested {} permutations, best total time {}s",
            candidates.len(),
            candidates[0].time
        );

        OptimizationResult {
            candidates,
            total_permutations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockMapsProvider;
    use crate::test_support::{FakeProvider, loc};
    use crate::types::{DirectionsRoute, RouteLeg};
    use std::sync::Arc;

    fn addresses(route: &[Location]) -> Vec<&str> {
        route.iter().map(|l| l.address.as_str()).collect()
    }

    /// [C, D] takes 100s in total, [D, C] takes 90s
    fn two_waypoint_provider() -> FakeProvider {
        FakeProvider::new()
            .with_leg("A", "C", 1000, 30)
            .with_edge("C", "D", 1000, 40)
            .with_leg("D", "B", 1000, 30)
            .with_leg("A", "D", 1000, 20)
            .with_leg("C", "B", 1000, 30)
    }

    #[tokio::test]
    async fn test_picks_faster_order() {
        let optimizer = RouteOptimizer::new(Arc::new(two_waypoint_provider()));
        let (a, b) = (loc("A", 0.0, 0.0), loc("B", 1.0, 1.0));
        let waypoints = [loc("C", 0.2, 0.2), loc("D", 0.5, 0.5)];

        let result = optimizer.optimize(&a, &b, &waypoints, 2).await;

        assert_eq!(addresses(result.optimal_route()), vec!["A", "D", "C", "B"]);
        assert_eq!(result.total_time(), 90);
        assert_eq!(result.permutations_tested(), 2);
        assert_eq!(result.worst().time, 100);
        assert_eq!(result.time_saved(), 10);
        assert_eq!(addresses(result.optimal_waypoints()), vec!["D", "C"]);
    }

    #[tokio::test]
    async fn test_exhaustive_when_cap_is_large() {
        let provider = FakeProvider::new()
            .with_edge("O", "W1", 0, 50)
            .with_edge("O", "W2", 0, 10)
            .with_edge("O", "W3", 0, 70)
            .with_edge("W1", "W2", 0, 25)
            .with_edge("W1", "W3", 0, 15)
            .with_edge("W2", "W3", 0, 60)
            .with_edge("W1", "Z", 0, 40)
            .with_edge("W2", "Z", 0, 35)
            .with_edge("W3", "Z", 0, 5);
        let optimizer = RouteOptimizer::new(Arc::new(provider));
        let (o, z) = (loc("O", 0.0, 0.0), loc("Z", 9.0, 9.0));
        let waypoints = [loc("W1", 1.0, 1.0), loc("W2", 2.0, 2.0), loc("W3", 3.0, 3.0)];

        let result = optimizer.optimize(&o, &z, &waypoints, 100).await;

        assert_eq!(result.permutations_tested(), 6);
        assert_eq!(result.total_permutations, 6);
        for candidate in &result.candidates {
            assert!(result.total_time() <= candidate.time);
            assert_eq!(candidate.route.len(), waypoints.len() + 2);
            assert_eq!(candidate.route[0].address, "O");
            assert_eq!(candidate.route[4].address, "Z");
        }
        // O-W2 10, W2-W1 25, W1-W3 15, W3-Z 5
        assert_eq!(addresses(result.optimal_route()), vec!["O", "W2", "W1", "W3", "Z"]);
        assert_eq!(result.total_time(), 55);
    }

    #[tokio::test]
    async fn test_cap_truncates_to_enumeration_prefix() {
        let mut mock = MockMapsProvider::new();
        // 4 orderings x 4 legs each
        mock.expect_directions().times(16).returning(|_| {
            Ok(DirectionsRoute {
                legs: vec![RouteLeg {
                    distance_meters: 0,
                    duration_seconds: 60,
                }],
                waypoint_order: vec![],
            })
        });
        let optimizer = RouteOptimizer::new(Arc::new(mock));

        let (o, z) = (loc("O", 0.0, 0.0), loc("Z", 9.0, 9.0));
        let waypoints = [loc("P", 1.0, 1.0), loc("Q", 2.0, 2.0), loc("R", 3.0, 3.0)];

        let result = optimizer.optimize(&o, &z, &waypoints, 4).await;

        assert_eq!(result.permutations_tested(), 4);
        assert_eq!(result.total_permutations, 6);

        let mut by_rank = result.candidates.clone();
        by_rank.sort_by_key(|c| c.rank);
        let tested: Vec<Vec<&str>> = by_rank.iter().map(|c| addresses(&c.route[1..4])).collect();
        assert_eq!(
            tested,
            vec![
                vec!["P", "Q", "R"],
                vec!["P", "R", "Q"],
                vec!["Q", "P", "R"],
                vec!["Q", "R", "P"],
            ]
        );
    }

    #[tokio::test]
    async fn test_ties_go_to_first_enumerated() {
        // Every leg fails, so every ordering costs the same
        let optimizer = RouteOptimizer::new(Arc::new(FakeProvider::new()));
        let (o, z) = (loc("O", 0.0, 0.0), loc("Z", 9.0, 9.0));
        let waypoints = [loc("P", 1.0, 1.0), loc("Q", 2.0, 2.0), loc("R", 3.0, 3.0)];

        let result = optimizer.optimize(&o, &z, &waypoints, 100).await;

        assert_eq!(result.total_time(), 4 * LEG_FAILURE_PENALTY_SECS);
        assert_eq!(addresses(result.optimal_route()), vec!["O", "P", "Q", "R", "Z"]);
        let ranks: Vec<usize> = result.candidates.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(result.time_saved(), 0);
    }

    #[tokio::test]
    async fn test_no_waypoints() {
        let provider = Arc::new(FakeProvider::new().with_leg("O", "Z", 5000, 300));
        let optimizer = RouteOptimizer::new(provider.clone());
        let (o, z) = (loc("O", 0.0, 0.0), loc("Z", 9.0, 9.0));

        let result = optimizer.optimize(&o, &z, &[], 100).await;

        assert_eq!(result.permutations_tested(), 1);
        assert_eq!(result.total_permutations, 1);
        assert_eq!(result.total_time(), 300);
        assert!(result.optimal_waypoints().is_empty());
        assert_eq!(provider.directions_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_cap_still_tests_one() {
        let optimizer = RouteOptimizer::new(Arc::new(two_waypoint_provider()));
        let (a, b) = (loc("A", 0.0, 0.0), loc("B", 1.0, 1.0));
        let waypoints = [loc("C", 0.2, 0.2), loc("D", 0.5, 0.5)];

        let result = optimizer.optimize(&a, &b, &waypoints, 0).await;

        assert_eq!(result.permutations_tested(), 1);
        assert_eq!(addresses(result.optimal_route()), vec!["A", "C", "D", "B"]);
        assert_eq!(result.total_time(), 100);
    }
}
