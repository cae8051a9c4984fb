//! In-memory providers for unit tests.

use aqm_core::{
    error::{ProviderError, Result},
    location::{CoordinateKey, GeocodedPlace},
    pollutant::PollutantReading,
    provider::{AirQualityProvider, Geocoder, WeatherProvider},
    weather::WeatherSnapshot,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

pub fn reading(pm2_5: f64, pm10: f64) -> PollutantReading {
    PollutantReading {
        pm2_5: Some(pm2_5),
        pm10: Some(pm10),
        ..Default::default()
    }
}

/// Answers from fixed tables; unknown coordinates get a clean-air reading.
#[derive(Default)]
pub struct StubService {
    readings: HashMap<CoordinateKey, PollutantReading>,
    failing: HashSet<CoordinateKey>,
    places: HashMap<String, GeocodedPlace>,
    weather_down: bool,
    geocoder_down: bool,
    calls: RefCell<Vec<String>>,
}

impl StubService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(mut self, lat: f64, lon: f64, reading: PollutantReading) -> Self {
        self.readings
            .insert(CoordinateKey::from_coords(lat, lon), reading);
        self
    }

    pub fn failing_at(mut self, lat: f64, lon: f64) -> Self {
        self.failing.insert(CoordinateKey::from_coords(lat, lon));
        self
    }

    pub fn with_place(mut self, query: &str, name: &str, country: &str, lat: f64, lon: f64) -> Self {
        self.places.insert(
            query.to_string(),
            GeocodedPlace {
                name: name.to_string(),
                country: country.to_string(),
                lat,
                lon,
            },
        );
        self
    }

    pub fn weather_down(mut self) -> Self {
        self.weather_down = true;
        self
    }

    pub fn geocoder_down(mut self) -> Self {
        self.geocoder_down = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl AirQualityProvider for StubService {
    async fn pollution(&self, lat: f64, lon: f64) -> Result<PollutantReading> {
        self.log(String::from("pollution"));
        let key = CoordinateKey::from_coords(lat, lon);
        if self.failing.contains(&key) {
            return Err(ProviderError::Status {
                endpoint: "air_pollution",
                status: 500,
            });
        }
        Ok(self
            .readings
            .get(&key)
            .cloned()
            .unwrap_or_else(|| reading(5.0, 10.0)))
    }
}

impl WeatherProvider for StubService {
    async fn weather(&self, _lat: f64, _lon: f64) -> Result<WeatherSnapshot> {
        self.log(String::from("weather"));
        if self.weather_down {
            return Err(ProviderError::Status {
                endpoint: "weather",
                status: 503,
            });
        }
        Ok(WeatherSnapshot {
            temperature: 25.0,
            humidity: 60.0,
            wind_speed: 2.5,
            visibility: Some(8000.0),
            description: String::from("clear sky"),
        })
    }
}

impl Geocoder for StubService {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>> {
        self.log(format!("geocode:{}", query));
        if self.geocoder_down {
            return Err(ProviderError::Transport(String::from("connection refused")));
        }
        Ok(self.places.get(query).cloned())
    }
}
