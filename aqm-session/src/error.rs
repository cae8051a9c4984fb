//! Error types for a single location resolution
use aqm_core::{error::ProviderError, location::CoordinateError, provider::GeolocationDenial};
use thiserror::Error;

/// Why a resolution ended without a result.
///
/// Every variant leaves the session ready for another attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The caller's own position is unavailable
    #[error("Location unavailable: {0}")]
    LocationUnavailable(GeolocationDenial),

    /// Geocoding returned no match for the text
    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    /// The geocoding provider itself failed
    #[error("Place search failed: {0}")]
    SearchFailed(ProviderError),

    /// Pollution or weather provider failed
    #[error("Data fetch failed: {0}")]
    DataFetchFailed(ProviderError),

    /// The coordinate cannot be queried
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(#[from] CoordinateError),
}

impl ResolveError {
    /// Message shown to the user in place of a result.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::LocationUnavailable(GeolocationDenial::Unsupported) => {
                "Geolocation is not supported on this device. Please search for a city manually."
            }
            ResolveError::LocationUnavailable(GeolocationDenial::Denied) => {
                "Unable to get your location. Please search for a city manually."
            }
            ResolveError::PlaceNotFound(_) => {
                "City not found. Please check the spelling and try again."
            }
            ResolveError::SearchFailed(_) => "Failed to search for city. Please try again.",
            ResolveError::DataFetchFailed(_) => {
                "Failed to fetch air quality data. Please check your internet connection and try again."
            }
            ResolveError::InvalidCoordinates(_) => {
                "That location is outside the valid coordinate range."
            }
        }
    }
}
