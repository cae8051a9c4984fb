//! Plain-text and JSON rendering of session state.

use aqm_core::category::Category;
use aqm_session::{history::History, markers::MarkerRegistry, resolve::Snapshot};
use aqm_utils::coords::format_pair;
use serde::Serialize;

/// Snapshot plus the derived display fields, for `--json` output.
#[derive(Serialize)]
struct SnapshotJson<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    category_label: &'static str,
    css_class: &'static str,
    color_hex: String,
    advisories: &'static [&'static str],
}

pub fn snapshot_json(snapshot: &Snapshot) -> anyhow::Result<String> {
    let category = snapshot.result.category;
    let json = SnapshotJson {
        snapshot,
        category_label: category.label(),
        css_class: category.css_class(),
        color_hex: snapshot.result.color.hex(),
        advisories: snapshot.result.advisories(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Join rendered lines, each terminated by a newline.
fn to_text(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Full current-location panel: AQI, weather, pollutants and advice.
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let location = &snapshot.location;
    let result = &snapshot.result;
    let weather = &snapshot.weather;
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} ({})",
        location.name,
        format_pair(location.lat, location.lon, 4)
    ));
    lines.push(format!(
        "AQI {} - {} [{}]",
        result.aqi,
        result.category,
        result.color.hex()
    ));

    lines.push(String::new());
    lines.push(format!("Weather: {}", weather.description));
    let conditions = [
        ("Temperature", weather.temperature_display()),
        ("Humidity", weather.humidity_display()),
        ("Wind Speed", weather.wind_speed_display()),
        ("Visibility", weather.visibility_display()),
    ];
    for (label, value) in conditions {
        lines.push(format!("  {:<12} {}", label, value));
    }

    lines.push(String::new());
    lines.push(String::from("Pollutant Concentrations (µg/m³)"));
    for (label, value) in result.pollutants.display_rows() {
        lines.push(format!("  {:<12} {}", label, value));
    }

    lines.push(String::new());
    lines.push(String::from("Health Recommendations"));
    for advice in result.advisories() {
        lines.push(format!("  - {}", advice));
    }
    to_text(lines)
}

/// Trend table, oldest first.
pub fn render_trend(history: &History) -> String {
    let mut lines = vec![format!("AQI Trend (Last {} readings)", history.len())];
    for sample in history.iter() {
        lines.push(format!(
            "  {}  {:>3}  {}",
            sample.time_label,
            sample.aqi,
            Category::from_aqi(sample.aqi)
        ));
    }
    to_text(lines)
}

/// Marker table in insertion order.
pub fn render_markers(registry: &MarkerRegistry) -> String {
    let lines: Vec<String> = registry
        .snapshot()
        .iter()
        .map(|record| {
            format!(
                "{:<28} {:>3}  {:<24} {}  {}",
                record.location.name,
                record.aqi,
                record.category.label(),
                record.color.hex(),
                record.tier.label()
            )
        })
        .collect();
    if lines.is_empty() {
        return String::new();
    }
    to_text(lines)
}

/// AQI color scale reference.
pub fn render_legend() -> String {
    let mut lines = vec![String::from("AQI Color Scale")];
    for category in Category::ALL {
        lines.push(format!(
            "  {}  {:<34} {}",
            category.color().hex(),
            category.range_label(),
            category.description()
        ));
    }
    to_text(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqm_core::{
        aqi::AqiResult, location::LocationQuery, pollutant::PollutantReading,
        weather::WeatherSnapshot,
    };
    use aqm_session::history::HistorySample;

    fn snapshot() -> Snapshot {
        Snapshot {
            location: LocationQuery::new("Delhi, IN", 28.6139, 77.209).unwrap(),
            result: AqiResult::from_reading(PollutantReading {
                pm2_5: Some(88.19),
                pm10: Some(131.05),
                co: Some(1121.52),
                ..Default::default()
            }),
            weather: WeatherSnapshot {
                temperature: 31.05,
                humidity: 48.0,
                wind_speed: 2.06,
                visibility: Some(2500.0),
                description: String::from("haze"),
            },
        }
    }

    #[test]
    fn test_render_snapshot() {
        let text = render_snapshot(&snapshot());
        assert!(text.starts_with("Delhi, IN (28.6139, 77.2090)\n"));
        assert!(text.contains("AQI 168 - Unhealthy [#ef4444]"));
        assert!(text.contains("Temperature  31°C"));
        assert!(text.contains("Visibility   2.5 km"));
        assert!(text.contains("CO           1122"));
        assert!(text.contains("O₃           N/A"));
        assert!(text.contains("  - Wear N95 masks when going outside."));
    }

    #[test]
    fn test_snapshot_json() {
        let json = snapshot_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["aqi"], 168);
        assert_eq!(value["css_class"], "aqi-unhealthy");
        assert_eq!(value["location"]["name"], "Delhi, IN");
        assert_eq!(value["advisories"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_render_trend() {
        let mut history = History::new();
        history.record(HistorySample::new("09:00", 42));
        history.record(HistorySample::new("09:05", 151));
        let text = render_trend(&history);
        assert_eq!(
            text,
            "AQI Trend (Last 2 readings)\n  09:00   42  Good\n  09:05  151  Unhealthy\n"
        );
    }

    #[test]
    fn test_render_markers() {
        let mut registry = MarkerRegistry::new();
        assert_eq!(render_markers(&registry), "");
        let snapshot = snapshot();
        registry.upsert(snapshot.location, &snapshot.result);
        let text = render_markers(&registry);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("Delhi, IN"));
        assert!(text.trim_end().ends_with("#ef4444  ad-hoc"));
    }

    #[test]
    fn test_render_legend() {
        let text = render_legend();
        assert_eq!(text.lines().count(), 7);
        assert!(text.contains("#10b981  Good (0-50)"));
    }
}
