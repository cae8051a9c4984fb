use serde::{Deserialize, Serialize};

/// Current conditions reported alongside the pollution snapshot.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Visibility in metres, when the provider reports it
    pub visibility: Option<f64>,
    pub description: String,
}

impl WeatherSnapshot {
    pub fn temperature_display(&self) -> String {
        format!("{}°C", self.temperature.round() as i64)
    }

    pub fn humidity_display(&self) -> String {
        format!("{}%", self.humidity.round() as i64)
    }

    pub fn wind_speed_display(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }

    pub fn visibility_display(&self) -> String {
        match self.visibility {
            Some(metres) => format!("{:.1} km", metres / 1000.0),
            None => String::from("N/A"),
        }
    }
}
