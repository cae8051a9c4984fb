//! Seams to the external collaborators: pollution, weather, geocoding and
//! geolocation providers.
//!
//! The traits use `async fn` and are consumed generically; nothing here
//! needs to be object safe or `Send`.
#![allow(async_fn_in_trait)]

use crate::{
    error::Result, location::GeocodedPlace, pollutant::PollutantReading,
    weather::WeatherSnapshot,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns the current pollutant snapshot for a coordinate.
pub trait AirQualityProvider {
    async fn pollution(&self, lat: f64, lon: f64) -> Result<PollutantReading>;
}

/// Returns current weather for a coordinate.
pub trait WeatherProvider {
    async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot>;
}

/// Resolves free text to its best matching place, `None` when unmatched.
pub trait Geocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>>;
}

/// Why the caller's own position could not be determined.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum GeolocationDenial {
    Unsupported,
    Denied,
}

impl fmt::Display for GeolocationDenial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeolocationDenial::Unsupported => f.write_str("geolocation unsupported"),
            GeolocationDenial::Denied => f.write_str("geolocation denied"),
        }
    }
}

/// Yields the caller's coordinate as (lat, lon).
pub trait Geolocator {
    async fn locate(&self) -> std::result::Result<(f64, f64), GeolocationDenial>;
}

/// Geolocation backed by a configured coordinate; without one the device
/// is treated as having no geolocation support.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct FixedGeolocator {
    pub position: Option<(f64, f64)>,
}

impl FixedGeolocator {
    pub fn new(lat: Option<f64>, lon: Option<f64>) -> Self {
        let position = match (lat, lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };
        FixedGeolocator { position }
    }
}

impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> std::result::Result<(f64, f64), GeolocationDenial> {
        self.position.ok_or(GeolocationDenial::Unsupported)
    }
}
