use crate::{
    advisory,
    breakpoint::{sub_index, PM10_BREAKPOINTS, PM25_BREAKPOINTS},
    category::{Category, Rgb},
    pollutant::PollutantReading,
};
use serde::{Deserialize, Serialize};

/// Lowest AQI ever reported; an all-zero reading is not a "perfect" zero.
pub const AQI_FLOOR: f64 = 1.0;

/// Unrounded AQI for a reading.
///
/// Only PM2.5 and PM10 take part; each goes through its own breakpoint
/// table and the worst sub-index wins. A missing pollutant contributes 0.
pub fn compute_aqi(reading: &PollutantReading) -> f64 {
    let pm25 = reading
        .pm2_5
        .map(|c| sub_index(c, &PM25_BREAKPOINTS))
        .unwrap_or(0.0);
    let pm10 = reading
        .pm10
        .map(|c| sub_index(c, &PM10_BREAKPOINTS))
        .unwrap_or(0.0);
    pm25.max(pm10).max(AQI_FLOOR)
}

/// AQI rounded to the nearest integer, as displayed and stored.
pub fn rounded_aqi(reading: &PollutantReading) -> u32 {
    compute_aqi(reading).round() as u32
}

/// Result of converting one pollutant snapshot into an index.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AqiResult {
    pub aqi: u32,
    pub category: Category,
    pub color: Rgb,
    pub pollutants: PollutantReading,
}

impl AqiResult {
    pub fn from_reading(pollutants: PollutantReading) -> Self {
        let aqi = rounded_aqi(&pollutants);
        let category = Category::from_aqi(aqi);
        AqiResult {
            aqi,
            category,
            color: category.color(),
            pollutants,
        }
    }

    pub fn advisories(&self) -> &'static [&'static str] {
        advisory::recommendations(self.category)
    }
}
