//! API clients for mapping providers

pub mod google;

pub use google::GoogleMapsClient;
