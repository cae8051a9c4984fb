//! The provider round trip behind one resolution: turn a source into a
//! coordinate, then fetch pollution and weather for it concurrently.

use crate::error::ResolveError;
use aqm_core::{
    aqi::AqiResult,
    location::LocationQuery,
    provider::{AirQualityProvider, Geocoder, Geolocator, WeatherProvider},
    weather::WeatherSnapshot,
};
use aqm_utils::coords::point_label;
use log::debug;
use serde::{Deserialize, Serialize};

/// Name given to a position obtained from the geolocation provider.
pub const CURRENT_LOCATION_NAME: &str = "Current Location";

/// Where a resolution starts from.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum LocationSource {
    /// The caller's own position
    Geolocation,
    /// An explicit coordinate, e.g. a map click. Unnamed points are
    /// labelled with their coordinates.
    Coordinates {
        lat: f64,
        lon: f64,
        name: Option<String>,
    },
    /// Free text that must be geocoded first
    Place(String),
}

impl LocationSource {
    pub fn point(lat: f64, lon: f64) -> Self {
        LocationSource::Coordinates {
            lat,
            lon,
            name: None,
        }
    }

    pub fn place(text: impl Into<String>) -> Self {
        LocationSource::Place(text.into())
    }

    /// A place search with nothing but whitespace has nothing to resolve.
    pub fn is_blank(&self) -> bool {
        matches!(self, LocationSource::Place(text) if text.trim().is_empty())
    }
}

/// Everything produced by a successful resolution.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub location: LocationQuery,
    pub result: AqiResult,
    pub weather: WeatherSnapshot,
}

/// Turn a source into a named, validated coordinate.
pub async fn locate<S, G>(
    service: &S,
    geolocator: &G,
    source: &LocationSource,
) -> Result<LocationQuery, ResolveError>
where
    S: Geocoder,
    G: Geolocator,
{
    match source {
        LocationSource::Geolocation => {
            let (lat, lon) = geolocator
                .locate()
                .await
                .map_err(ResolveError::LocationUnavailable)?;
            Ok(LocationQuery::new(CURRENT_LOCATION_NAME, lat, lon)?)
        }
        LocationSource::Coordinates { lat, lon, name } => {
            let mut location = LocationQuery::new(String::new(), *lat, *lon)?;
            location.name = match name {
                Some(name) => name.clone(),
                None => point_label(location.lat, location.lon),
            };
            Ok(location)
        }
        LocationSource::Place(text) => {
            let text = text.trim();
            debug!("Geocoding {:?}", text);
            let place = service
                .geocode(text)
                .await
                .map_err(ResolveError::SearchFailed)?
                .ok_or_else(|| ResolveError::PlaceNotFound(text.to_string()))?;
            Ok(LocationQuery::new(place.display_name(), place.lat, place.lon)?)
        }
    }
}

/// Fetch pollution and weather for `location` concurrently. Either one
/// failing fails the whole fetch.
pub async fn fetch_snapshot<S>(service: &S, location: LocationQuery) -> Result<Snapshot, ResolveError>
where
    S: AirQualityProvider + WeatherProvider,
{
    let (pollutants, weather) = futures::try_join!(
        service.pollution(location.lat, location.lon),
        service.weather(location.lat, location.lon)
    )
    .map_err(ResolveError::DataFetchFailed)?;
    Ok(Snapshot {
        location,
        result: AqiResult::from_reading(pollutants),
        weather,
    })
}

/// Full resolution: locate, then fetch.
pub async fn resolve<S, G>(
    service: &S,
    geolocator: &G,
    source: &LocationSource,
) -> Result<Snapshot, ResolveError>
where
    S: AirQualityProvider + WeatherProvider + Geocoder,
    G: Geolocator,
{
    let location = locate(service, geolocator, source).await?;
    fetch_snapshot(service, location).await
}
