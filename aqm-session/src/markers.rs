//! Keyed registry of map markers.
//!
//! The registry owns every [`MarkerRecord`]; a map surface only renders the
//! snapshot it is handed. Records are keyed by [`CoordinateKey`], so a
//! location can appear at most once.

use aqm_core::{
    aqi::AqiResult,
    category::{Category, Rgb},
    error::ProviderError,
    location::{CoordinateKey, LocationQuery},
    provider::AirQualityProvider,
};
use futures::{stream, StreamExt};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::pin::pin;

/// Marker outline color.
pub const MARKER_STROKE: Rgb = Rgb(0xff, 0xff, 0xff);

pub const MARKER_FILL_OPACITY: f64 = 0.8;

/// How a marker got onto the map.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerTier {
    /// Bulk-seeded baseline city
    MajorCity,
    /// Placed by a user click or search
    AdHoc,
}

impl MarkerTier {
    pub fn label(&self) -> &'static str {
        match self {
            MarkerTier::MajorCity => "major-city",
            MarkerTier::AdHoc => "ad-hoc",
        }
    }

    pub fn radius(&self) -> u32 {
        match self {
            MarkerTier::MajorCity => 10,
            MarkerTier::AdHoc => 12,
        }
    }

    pub fn stroke_weight(&self) -> u32 {
        match self {
            MarkerTier::MajorCity => 2,
            MarkerTier::AdHoc => 3,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub location: LocationQuery,
    pub aqi: u32,
    pub category: Category,
    pub color: Rgb,
    pub tier: MarkerTier,
    /// Insertion sequence; later records are drawn on top.
    pub seq: u64,
}

impl MarkerRecord {
    pub fn key(&self) -> CoordinateKey {
        self.location.key()
    }

    /// Popup text: name, AQI and category. Ad-hoc markers also show their
    /// coordinates.
    pub fn popup_text(&self) -> String {
        let mut text = format!(
            "{}\nAQI {}\n{}",
            self.location.name,
            self.aqi,
            self.category.label()
        );
        if self.tier == MarkerTier::AdHoc {
            text.push('\n');
            text.push_str(&self.key().to_string());
        }
        text
    }

    fn to_feature(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [self.location.lon, self.location.lat],
            },
            "properties": {
                "name": self.location.name,
                "aqi": self.aqi,
                "category": self.category.label(),
                "tier": self.tier,
                "fillColor": self.color.hex(),
                "fillOpacity": MARKER_FILL_OPACITY,
                "color": MARKER_STROKE.hex(),
                "radius": self.tier.radius(),
                "weight": self.tier.stroke_weight(),
                "popup": self.popup_text(),
            },
        })
    }
}

/// How baseline cities are fetched during seeding.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SeedMode {
    /// One city at a time, each awaited before the next starts
    #[default]
    Sequential,
    /// Up to N requests in flight; records are still inserted in list order
    Buffered(usize),
}

impl SeedMode {
    pub fn from_concurrency(concurrency: usize) -> Self {
        if concurrency <= 1 {
            SeedMode::Sequential
        } else {
            SeedMode::Buffered(concurrency)
        }
    }

    fn in_flight(&self) -> usize {
        match self {
            SeedMode::Sequential => 1,
            SeedMode::Buffered(n) => (*n).max(1),
        }
    }
}

/// A city skipped during seeding.
#[derive(Debug, PartialEq, Clone)]
pub struct SeedFailure {
    pub city: LocationQuery,
    pub error: ProviderError,
}

/// Outcome of a seeding pass. Failures are informational only.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct SeedReport {
    pub seeded: usize,
    pub failures: Vec<SeedFailure>,
}

#[derive(Debug, Default, Clone)]
pub struct MarkerRegistry {
    records: HashMap<CoordinateKey, MarkerRecord>,
    next_seq: u64,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, location: LocationQuery, result: &AqiResult, tier: MarkerTier) -> &MarkerRecord {
        let record = MarkerRecord {
            location,
            aqi: result.aqi,
            category: result.category,
            color: result.color,
            tier,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let key = record.key();
        self.records.insert(key, record);
        &self.records[&key]
    }

    /// Insert or replace the marker at this location, tagged ad-hoc.
    pub fn upsert(&mut self, location: LocationQuery, result: &AqiResult) -> &MarkerRecord {
        self.insert(location, result, MarkerTier::AdHoc)
    }

    pub fn get(&self, key: &CoordinateKey) -> Option<&MarkerRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_tier(&self, tier: MarkerTier) -> usize {
        self.records.values().filter(|r| r.tier == tier).count()
    }

    /// All records in insertion order.
    pub fn snapshot(&self) -> Vec<&MarkerRecord> {
        let mut records: Vec<&MarkerRecord> = self.records.values().collect();
        records.sort_by_key(|r| r.seq);
        records
    }

    /// Registry as a GeoJSON FeatureCollection, in insertion order.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self.snapshot().iter().map(|r| r.to_feature()).collect();
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }

    /// Resolve each city in list order and insert it as a major-city
    /// marker. A city whose fetch fails is logged and skipped; the rest
    /// still run.
    pub async fn seed_major_cities<P>(
        &mut self,
        provider: &P,
        cities: &[LocationQuery],
        mode: SeedMode,
    ) -> SeedReport
    where
        P: AirQualityProvider,
    {
        info!("Seeding {} major cities ({:?})", cities.len(), mode);
        let mut report = SeedReport::default();
        let mut fetches = pin!(stream::iter(cities)
            .map(move |city| async move { (city, provider.pollution(city.lat, city.lon).await) })
            .buffered(mode.in_flight()));

        while let Some((city, outcome)) = fetches.next().await {
            match outcome {
                Ok(pollutants) => {
                    let result = AqiResult::from_reading(pollutants);
                    self.insert(city.clone(), &result, MarkerTier::MajorCity);
                    report.seeded += 1;
                }
                Err(error) => {
                    warn!("Error loading AQI for {}: {}", city.name, error);
                    report.failures.push(SeedFailure {
                        city: city.clone(),
                        error,
                    });
                }
            }
        }
        report
    }

    /// Remove every record, of either tier, then seed the baseline cities
    /// again from the provider.
    pub async fn clear_and_reseed<P>(
        &mut self,
        provider: &P,
        cities: &[LocationQuery],
        mode: SeedMode,
    ) -> SeedReport
    where
        P: AirQualityProvider,
    {
        info!("Clearing {} markers", self.records.len());
        self.records.clear();
        self.seed_major_cities(provider, cities, mode).await
    }
}
