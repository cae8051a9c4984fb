use serde::{Deserialize, Serialize};

/// Sub-index reported for any concentration above the last row of a table.
pub const AQI_CEILING: f64 = 500.0;

/// One severity tier of a pollutant breakpoint table.
///
/// `low`/`high` bound the concentration (µg/m³) and `aqi_low`/`aqi_high`
/// the index range the tier maps onto.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct BreakpointRow {
    pub low: f64,
    pub high: f64,
    pub aqi_low: f64,
    pub aqi_high: f64,
}

impl BreakpointRow {
    pub const fn new(low: f64, high: f64, aqi_low: f64, aqi_high: f64) -> Self {
        Self {
            low,
            high,
            aqi_low,
            aqi_high,
        }
    }

    /// Linear interpolation along this tier.
    ///
    /// AQI = ((AQIhigh - AQIlow) / (Chigh - Clow)) * (C - Clow) + AQIlow
    fn interpolate(&self, concentration: f64) -> f64 {
        (self.aqi_high - self.aqi_low) / (self.high - self.low) * (concentration - self.low)
            + self.aqi_low
    }
}

/// PM2.5 breakpoints (µg/m³), six tiers from 0 to 500.
pub const PM25_BREAKPOINTS: [BreakpointRow; 6] = [
    BreakpointRow::new(0.0, 12.0, 0.0, 50.0),      // Good
    BreakpointRow::new(12.1, 35.4, 51.0, 100.0),   // Moderate
    BreakpointRow::new(35.5, 55.4, 101.0, 150.0),  // Unhealthy for Sensitive Groups
    BreakpointRow::new(55.5, 150.4, 151.0, 200.0), // Unhealthy
    BreakpointRow::new(150.5, 250.4, 201.0, 300.0), // Very Unhealthy
    BreakpointRow::new(250.5, 500.0, 301.0, 500.0), // Hazardous
];

/// PM10 breakpoints (µg/m³), six tiers from 0 to 604.
pub const PM10_BREAKPOINTS: [BreakpointRow; 6] = [
    BreakpointRow::new(0.0, 54.0, 0.0, 50.0),
    BreakpointRow::new(55.0, 154.0, 51.0, 100.0),
    BreakpointRow::new(155.0, 254.0, 101.0, 150.0),
    BreakpointRow::new(255.0, 354.0, 151.0, 200.0),
    BreakpointRow::new(355.0, 424.0, 201.0, 300.0),
    BreakpointRow::new(425.0, 604.0, 301.0, 500.0),
];

/// Map a concentration onto the AQI scale using `table`.
///
/// The first row whose `high` bound is at or above the concentration is
/// used. Values in the small gaps between tiers are extrapolated along
/// that row but never drop below the previous row's `aqi_high`, so the
/// sub-index stays non-decreasing. Anything past the last row saturates
/// at [`AQI_CEILING`].
pub fn sub_index(concentration: f64, table: &[BreakpointRow]) -> f64 {
    let mut floor = 0.0;
    for row in table {
        if concentration <= row.high {
            return row.interpolate(concentration).max(floor);
        }
        floor = row.aqi_high;
    }
    AQI_CEILING
}
