use serde::{Deserialize, Serialize};
use std::fmt;

/// Pollutants captured from the air pollution provider.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    Pm2_5,
    Pm10,
    No2,
    O3,
    So2,
    Co,
    No,
    Nh3,
}

impl Pollutant {
    /// Every pollutant, in display order.
    pub const ALL: [Pollutant; 8] = [
        Pollutant::Pm2_5,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::No,
        Pollutant::Nh3,
    ];

    /// Symbol used by the provider payload (e.g. `pm2_5`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
            Pollutant::No => "no",
            Pollutant::Nh3 => "nh3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pollutant::Pm2_5 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::No2 => "NO₂",
            Pollutant::O3 => "O₃",
            Pollutant::So2 => "SO₂",
            Pollutant::Co => "CO",
            Pollutant::No => "NO",
            Pollutant::Nh3 => "NH₃",
        }
    }

    /// Decimal places used when displaying a concentration. CO is reported
    /// on a much larger scale and is shown as a whole number.
    pub fn precision(&self) -> usize {
        match self {
            Pollutant::Co => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of pollutant concentrations (µg/m³) for one coordinate.
///
/// Field names follow the provider's `components` object so the struct
/// deserializes straight from the payload. Missing pollutants stay `None`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct PollutantReading {
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub no: Option<f64>,
    #[serde(default)]
    pub nh3: Option<f64>,
}

impl PollutantReading {
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm2_5 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::O3 => self.o3,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::No => self.no,
            Pollutant::Nh3 => self.nh3,
        }
    }

    /// Concentration formatted for display, or "N/A" when not reported.
    pub fn display_value(&self, pollutant: Pollutant) -> String {
        match self.get(pollutant) {
            Some(value) => format!("{:.*}", pollutant.precision(), value),
            None => String::from("N/A"),
        }
    }

    /// (label, formatted value) rows for every pollutant, in display order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        Pollutant::ALL
            .iter()
            .map(|p| (p.label(), self.display_value(*p)))
            .collect()
    }
}
