//! Error types for trip planning operations

use thiserror::Error;

/// Trip planning specific errors
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network or HTTP error, with the request URL stripped
    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (config files)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The provider answered with a non-success status
    #[error("Maps provider returned {status}: {message}")]
    ProviderError { status: String, message: String },

    /// The provider found no route between the requested points
    #[error("No route found")]
    NoRoute,

    /// Neither place lookup nor geocoding matched the query
    #[error("No results found for location: {0}")]
    LocationNotFound(String),

    /// Place lookup returned no candidates
    #[error("No precise location found for: {0}")]
    PreciseLocationNotFound(String),

    /// Place lookup returned a candidate without geometry
    #[error("No coordinates found for: {0}")]
    MissingCoordinates(String),

    /// Resolving a named place failed
    #[error("Failed to find location '{query}': {source}")]
    ResolutionFailed {
        query: String,
        #[source]
        source: Box<MapsError>,
    },

    /// A whole-route directions request failed
    #[error("Failed to get route: {0}")]
    RouteFailed(#[source] Box<MapsError>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MapsError {
    /// Wrap an error raised while resolving `query`
    pub fn resolution(query: impl Into<String>, source: MapsError) -> Self {
        MapsError::ResolutionFailed {
            query: query.into(),
            source: Box::new(source),
        }
    }
}

/// The request URL carries the API key, so it never reaches error text
impl From<reqwest::Error> for MapsError {
    fn from(err: reqwest::Error) -> Self {
        MapsError::NetworkError(err.without_url())
    }
}

/// Result type alias for trip planning operations
pub type Result<T> = std::result::Result<T, MapsError>;

/// Convert MapsError to trip_core::Error
impl From<MapsError> for trip_core::Error {
    fn from(err: MapsError) -> Self {
        trip_core::Error::ToolFailed(err.to_string())
    }
}
