use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Embedded CSV of the major cities shown as baseline map markers.
pub static MAJOR_CITIES_CSV: &str = include_str!("../../fixtures/major_cities.csv");

/// Decimal places that define coordinate identity (display precision).
pub const KEY_PRECISION: i32 = 4;

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum CoordinateError {
    #[error("Latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("Coordinates must be finite numbers")]
    NotFinite,
}

/// A queried place: a human label plus a coordinate.
///
/// Identity is the coordinate rounded to [`KEY_PRECISION`] decimals; the
/// name is only a label.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LocationQuery {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl LocationQuery {
    /// Validate and build a location. Longitudes outside [-180, 180) (as
    /// produced by a map that wraps around the antimeridian) are folded
    /// back into range, so 180 becomes -180.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        Ok(LocationQuery {
            name: name.into(),
            lat,
            lon: wrap_longitude(lon),
        })
    }

    pub fn key(&self) -> CoordinateKey {
        CoordinateKey::from_coords(self.lat, self.lon)
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Coordinate identity: latitude and longitude scaled by 10^4 and rounded.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct CoordinateKey {
    lat_e4: i64,
    lon_e4: i64,
}

impl CoordinateKey {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        let scale = 10f64.powi(KEY_PRECISION);
        CoordinateKey {
            lat_e4: (lat * scale).round() as i64,
            lon_e4: (lon * scale).round() as i64,
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat_e4 as f64 / 10f64.powi(KEY_PRECISION)
    }

    pub fn lon(&self) -> f64 {
        self.lon_e4 as f64 / 10f64.powi(KEY_PRECISION)
    }
}

impl fmt::Display for CoordinateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat(), self.lon())
    }
}

/// Best match returned by a geocoding lookup.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl GeocodedPlace {
    /// "Name, CC" as shown to the user.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Get the embedded major city list.
pub fn get_major_cities() -> Vec<LocationQuery> {
    if let Ok(cities) = parse_city_csv(MAJOR_CITIES_CSV) {
        cities
    } else {
        panic!("failed to parse embedded major cities csv")
    }
}

/// Parse a CSV of named coordinates.
///
/// Expected CSV columns: name, lat, lon (with a header row). Rows with an
/// unparsable or out-of-range coordinate are skipped.
pub fn parse_city_csv(csv_object: &str) -> Result<Vec<LocationQuery>, csv::Error> {
    let mut cities: Vec<LocationQuery> = Vec::new();
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_object.as_bytes());
    for row in rdr.records() {
        let record = row?;
        let name = record.get(0).unwrap_or_default();
        let lat = record.get(1).and_then(|s| s.parse::<f64>().ok());
        let lon = record.get(2).and_then(|s| s.parse::<f64>().ok());
        match (lat, lon) {
            (Some(lat), Some(lon)) => match LocationQuery::new(name, lat, lon) {
                Ok(city) => cities.push(city),
                Err(e) => log::warn!("Skipping city {}: {}", name, e),
            },
            _ => log::warn!("Skipping city row with bad coordinates: {:?}", record),
        }
    }
    Ok(cities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_cities() {
        let cities = get_major_cities();
        assert_eq!(cities.len(), 8);
        assert_eq!(cities[0].name, "Mumbai");
        assert_eq!(cities[7].name, "Ahmedabad");
    }

    #[test]
    fn test_key_rounds_to_display_precision() {
        let a = LocationQuery::new("a", 19.07601, 72.87769).unwrap();
        let b = LocationQuery::new("b", 19.0760, 72.8777).unwrap();
        let c = LocationQuery::new("c", 19.0761, 72.8777).unwrap();
        assert_eq!(a.key(), b.key());
        assert_ne!(b.key(), c.key());
        assert_eq!(b.key().to_string(), "19.0760, 72.8777");
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            LocationQuery::new("x", 91.0, 0.0),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            LocationQuery::new("x", f64::NAN, 0.0),
            Err(CoordinateError::NotFinite)
        );
        let wrapped = LocationQuery::new("x", 10.0, 190.0).unwrap();
        assert!((wrapped.lon - -170.0).abs() < 1e-9);
        let edge = LocationQuery::new("x", -90.0, -180.0).unwrap();
        assert_eq!(edge.lon, -180.0);
    }

    #[test]
    fn test_antimeridian_has_one_key() {
        let east = LocationQuery::new("east", 10.0, 180.0).unwrap();
        let west = LocationQuery::new("west", 10.0, -180.0).unwrap();
        assert_eq!(east.lon, -180.0);
        assert_eq!(east.key(), west.key());
        let inside = LocationQuery::new("x", 10.0, 179.99995).unwrap();
        assert_eq!(inside.lon, 179.99995);
    }

    #[test]
    fn test_parse_city_csv_skips_bad_rows() {
        let csv_data = "\
NAME,LAT,LON
London,51.5072,-0.1276
Nowhere,abc,1.0
Pole,95.0,0.0
";
        let cities = parse_city_csv(csv_data).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "London");
    }

    #[test]
    fn test_display_name() {
        let place = GeocodedPlace {
            name: String::from("London"),
            country: String::from("GB"),
            lat: 51.5,
            lon: -0.12,
        };
        assert_eq!(place.display_name(), "London, GB");
    }
}
