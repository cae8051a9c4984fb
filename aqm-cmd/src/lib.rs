//! Command implementations for the AQM CLI.
//!
//! Provides subcommands for resolving air quality by place name,
//! coordinates or the configured home location, seeding the major-city
//! marker map, and sampling a location repeatedly for a trend.

use clap::Subcommand;

pub mod config;
pub mod map;
pub mod query;
pub mod report;
pub mod watch;

use aqm_session::resolve::LocationSource;
use config::Config;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Air quality for a city or place name
    City {
        /// Place to search for, e.g. "New Delhi"
        #[arg(required = true)]
        name: Vec<String>,

        /// Print JSON instead of a text report
        #[arg(long)]
        json: bool,
    },

    /// Air quality at explicit coordinates (like clicking the map)
    Coords {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Label for the point; defaults to its coordinates
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Air quality at the configured home location
    Here {
        #[arg(long)]
        json: bool,
    },

    /// Seed major-city markers and print the marker registry
    Map {
        /// Extra ad-hoc points as LAT,LON (repeatable)
        #[arg(long = "at", value_parser = map::parse_point, allow_hyphen_values = true)]
        points: Vec<(f64, f64)>,

        /// Clear every marker and re-seed the major cities at the end
        #[arg(long)]
        clear: bool,

        /// Number of city requests in flight while seeding (1 = one at a time)
        #[arg(long, default_value_t = 1)]
        concurrency: usize,

        /// CSV of NAME,LAT,LON to use instead of the built-in city list
        #[arg(long)]
        cities_csv: Option<String>,

        /// Print the registry as GeoJSON
        #[arg(long)]
        geojson: bool,
    },

    /// Sample a place repeatedly and print the AQI trend
    Watch {
        #[arg(required = true)]
        name: Vec<String>,

        /// Number of readings to take
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Seconds between readings
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
    },
}

pub async fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::City { name, json } => {
            query::run_query(config, LocationSource::place(name.join(" ")), json).await
        }
        Command::Coords {
            lat,
            lon,
            name,
            json,
        } => query::run_query(config, LocationSource::Coordinates { lat, lon, name }, json).await,
        Command::Here { json } => query::run_query(config, LocationSource::Geolocation, json).await,
        Command::Map {
            points,
            clear,
            concurrency,
            cities_csv,
            geojson,
        } => {
            let options = map::MapOptions {
                points,
                clear,
                concurrency,
                cities_csv,
                geojson,
            };
            map::run_map(config, options).await
        }
        Command::Watch {
            name,
            count,
            interval_secs,
        } => watch::run_watch(config, &name.join(" "), count, interval_secs).await,
    }
}
