//! Repeated sampling of one place to build an AQI trend.

use crate::{config::Config, report};
use aqm_session::{resolve::LocationSource, Resolution};
use anyhow::bail;
use log::warn;
use std::time::Duration;

/// Resolve `name` once, then re-sample its coordinates `count - 1` more
/// times, printing each reading and finally the trend.
pub async fn run_watch(
    config: &Config,
    name: &str,
    count: usize,
    interval_secs: u64,
) -> anyhow::Result<()> {
    let mut session = config.session()?;
    let mut source = LocationSource::place(name);

    for reading in 0..count {
        match session.resolve_location(source.clone()).await {
            Resolution::Applied => {
                if let (Some(location), Some(sample)) =
                    (session.current_location(), session.history().latest())
                {
                    println!(
                        "{}  {}  AQI {} ({})",
                        sample.time_label,
                        location.name,
                        sample.aqi,
                        aqm_core::category::Category::from_aqi(sample.aqi)
                    );
                    source = LocationSource::Coordinates {
                        lat: location.lat,
                        lon: location.lon,
                        name: Some(location.name.clone()),
                    };
                }
            }
            Resolution::Skipped => bail!("Enter a city name to watch"),
            Resolution::Failed | Resolution::Stale => {
                if let Some(message) = session.error_message() {
                    warn!("Reading {} failed: {}", reading + 1, message);
                }
            }
        }
        if reading + 1 < count {
            tokio::time::sleep(Duration::from_secs(interval_secs)).await;
        }
    }

    if session.history().is_empty() {
        bail!("No readings for {}", name);
    }
    print!("\n{}", report::render_trend(session.history()));
    Ok(())
}
