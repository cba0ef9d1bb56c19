//! Human-facing renderings: share links, distances, durations

use url::form_urlencoded;

use crate::types::{Location, Waypoint};

/// Base of a Google Maps directions link
pub const GOOGLE_MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/";

// `f64` Display prints plain decimals, never exponent form like `1e-7`
fn encode_point(location: &Location) -> String {
    form_urlencoded::byte_serialize(location.to_query().as_bytes()).collect()
}

/// Directions link through every point in order
///
/// Each `lat,lng` segment is percent-encoded (the comma becomes `%2C`).
pub fn google_maps_url(origin: &Location, destination: &Location, waypoints: &[Waypoint]) -> String {
    let segments: Vec<String> = std::iter::once(origin)
        .chain(waypoints.iter().map(|wp| &wp.location))
        .chain(std::iter::once(destination))
        .map(encode_point)
        .collect();

    format!("{GOOGLE_MAPS_DIR_URL}{}", segments.join("/"))
}

/// `"<km> km"` with one decimal
pub fn format_distance(meters: u64) -> String {
    format!("{:.1} km", meters as f64 / 1000.0)
}

/// `"<h>h <m>m"`, minutes truncated
pub fn format_duration(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Savings of the best ordering over the worst one tested
pub fn format_time_savings(saved_seconds: u64, permutations_tested: usize) -> String {
    if permutations_tested > 1 {
        let minutes = (saved_seconds as f64 / 60.0).round() as u64;
        format!("{minutes} minutes saved vs worst route")
    } else {
        "No alternative routes to compare".to_string()
    }
}
