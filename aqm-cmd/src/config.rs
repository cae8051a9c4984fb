//! Global options shared by every subcommand.

use aqm_core::{
    openweather::{OpenWeatherClient, DEFAULT_BASE_URL},
    provider::FixedGeolocator,
};
use aqm_session::Session;
use clap::Args;
use std::time::Duration;

/// Session type driven by the CLI.
pub type CliSession = Session<OpenWeatherClient, FixedGeolocator>;

#[derive(Args, Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key
    #[arg(long, env = "OWM_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the OpenWeatherMap API
    #[arg(long, env = "OWM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Attempts per request; values above 1 retry with exponential backoff
    #[arg(long, default_value_t = 1)]
    pub max_tries: u32,

    /// Latitude reported as "my location" (geolocation is unsupported without it)
    #[arg(long, env = "AQM_HOME_LAT", allow_hyphen_values = true)]
    pub home_lat: Option<f64>,

    /// Longitude reported as "my location"
    #[arg(long, env = "AQM_HOME_LON", allow_hyphen_values = true)]
    pub home_lon: Option<f64>,
}

impl Config {
    pub fn client(&self) -> anyhow::Result<OpenWeatherClient> {
        let client = OpenWeatherClient::with_timeout(
            self.api_key.as_str(),
            self.base_url.as_str(),
            Duration::from_secs(self.timeout_secs),
        )?;
        Ok(client.max_tries(self.max_tries))
    }

    pub fn geolocator(&self) -> FixedGeolocator {
        FixedGeolocator::new(self.home_lat, self.home_lon)
    }

    pub fn session(&self) -> anyhow::Result<CliSession> {
        Ok(Session::new(self.client()?, self.geolocator()))
    }
}
