//! Marker map: seed the baseline cities, add ad-hoc points, print the
//! registry.

use crate::{config::Config, report};
use aqm_core::location::{get_major_cities, parse_city_csv};
use aqm_session::{markers::SeedMode, resolve::LocationSource, Resolution};
use log::{info, warn};

#[derive(Debug, Default)]
pub struct MapOptions {
    pub points: Vec<(f64, f64)>,
    pub clear: bool,
    pub concurrency: usize,
    pub cities_csv: Option<String>,
    pub geojson: bool,
}

/// Parse a "LAT,LON" pair.
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got {:?}", s))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad latitude {:?}: {}", lat, e))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad longitude {:?}: {}", lon, e))?;
    Ok((lat, lon))
}

pub async fn run_map(config: &Config, options: MapOptions) -> anyhow::Result<()> {
    let cities = match &options.cities_csv {
        Some(path) => parse_city_csv(&std::fs::read_to_string(path)?)?,
        None => get_major_cities(),
    };
    let mut session = config
        .session()?
        .with_cities(cities)
        .with_seed_mode(SeedMode::from_concurrency(options.concurrency));

    let report = session.seed_major_cities().await;
    info!(
        "Seeded {} cities, skipped {}",
        report.seeded,
        report.failures.len()
    );

    for (lat, lon) in &options.points {
        let resolution = session
            .resolve_location(LocationSource::point(*lat, *lon))
            .await;
        if resolution == Resolution::Failed {
            if let Some(message) = session.error_message() {
                warn!("Skipping point {},{}: {}", lat, lon, message);
            }
        }
    }

    if options.clear {
        let report = session.clear_markers().await;
        info!(
            "Cleared markers; re-seeded {} cities, skipped {}",
            report.seeded,
            report.failures.len()
        );
    }

    if options.geojson {
        println!("{}", serde_json::to_string_pretty(&session.markers().to_geojson())?);
    } else {
        print!("{}", report::render_markers(session.markers()));
        println!();
        print!("{}", report::render_legend());
    }
    Ok(())
}
