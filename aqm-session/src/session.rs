//! Query session controller.
//!
//! `Session` owns the mutable state a presentation layer reads: the current
//! snapshot, loading flag, error, AQI history and the marker registry. All
//! of it changes only through the transitions below.
//!
//! # Overlapping resolutions
//!
//! In-flight resolutions are never cancelled. Each one takes a [`Ticket`]
//! from a monotonic generation counter when it starts; a response arriving
//! for anything but the latest ticket is discarded, so a slow early request
//! cannot overwrite the result of a later one.

use crate::{
    error::ResolveError,
    history::{History, HistorySample},
    markers::{MarkerRegistry, SeedMode, SeedReport},
    resolve::{self, LocationSource, Snapshot},
};
use aqm_core::{
    aqi::AqiResult,
    location::{get_major_cities, LocationQuery},
    provider::{AirQualityProvider, Geocoder, Geolocator, WeatherProvider},
    weather::WeatherSnapshot,
};
use log::{info, warn};

/// Where the session is in its Idle → Loading → Success/Error cycle.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for one started resolution.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ticket {
    generation: u64,
}

/// What happened to a completed resolution.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Resolution {
    /// Became the current result
    Applied,
    /// Ended in an error now shown by the session
    Failed,
    /// Superseded by a later resolution and dropped
    Stale,
    /// Nothing to resolve (blank search text)
    Skipped,
}

pub struct Session<S, G> {
    service: S,
    geolocator: G,
    generation: u64,
    phase: Phase,
    error: Option<ResolveError>,
    current: Option<Snapshot>,
    history: History,
    markers: MarkerRegistry,
    cities: Vec<LocationQuery>,
    seed_mode: SeedMode,
    clock: fn() -> String,
}

impl<S, G> Session<S, G>
where
    S: AirQualityProvider + WeatherProvider + Geocoder,
    G: Geolocator,
{
    /// New idle session seeded from the embedded major city list.
    pub fn new(service: S, geolocator: G) -> Self {
        Session {
            service,
            geolocator,
            generation: 0,
            phase: Phase::Idle,
            error: None,
            current: None,
            history: History::new(),
            markers: MarkerRegistry::new(),
            cities: get_major_cities(),
            seed_mode: SeedMode::default(),
            clock: aqm_utils::time::now_label,
        }
    }

    pub fn with_cities(mut self, cities: Vec<LocationQuery>) -> Self {
        self.cities = cities;
        self
    }

    pub fn with_seed_mode(mut self, seed_mode: SeedMode) -> Self {
        self.seed_mode = seed_mode;
        self
    }

    /// Replace the source of history time labels.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    /// Enter Loading for a new resolution, clearing any shown error.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.phase = Phase::Loading;
        self.error = None;
        Ticket {
            generation: self.generation,
        }
    }

    /// Apply the outcome of the resolution started with `ticket`.
    ///
    /// Only the most recently started resolution may change state; any
    /// other outcome is dropped and reported as [`Resolution::Stale`].
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Snapshot, ResolveError>,
    ) -> Resolution {
        if ticket.generation != self.generation {
            info!(
                "Discarding stale response (generation {}, current {})",
                ticket.generation, self.generation
            );
            return Resolution::Stale;
        }
        match outcome {
            Ok(snapshot) => {
                info!(
                    "AQI {} ({}) for {}",
                    snapshot.result.aqi, snapshot.result.category, snapshot.location.name
                );
                self.history
                    .record(HistorySample::new((self.clock)(), snapshot.result.aqi));
                self.markers
                    .upsert(snapshot.location.clone(), &snapshot.result);
                self.current = Some(snapshot);
                self.phase = Phase::Success;
                Resolution::Applied
            }
            Err(error) => {
                warn!("Resolution failed: {}", error);
                self.error = Some(error);
                self.phase = Phase::Error;
                Resolution::Failed
            }
        }
    }

    /// Resolve a source end to end: Loading, provider round trip, then
    /// Success or Error.
    pub async fn resolve_location(&mut self, source: LocationSource) -> Resolution {
        if source.is_blank() {
            return Resolution::Skipped;
        }
        let ticket = self.begin();
        let outcome = resolve::resolve(&self.service, &self.geolocator, &source).await;
        self.complete(ticket, outcome)
    }

    /// Seed the baseline major-city markers.
    pub async fn seed_major_cities(&mut self) -> SeedReport {
        self.markers
            .seed_major_cities(&self.service, &self.cities, self.seed_mode)
            .await
    }

    /// Drop every marker and re-fetch the baseline cities. The current
    /// snapshot and history are kept; only the registry is reset.
    pub async fn clear_markers(&mut self) -> SeedReport {
        self.markers
            .clear_and_reseed(&self.service, &self.cities, self.seed_mode)
            .await
    }

    /// Close the result/error panel and return to Idle. A resolution in
    /// flight is unaffected.
    pub fn dismiss(&mut self) {
        if self.phase != Phase::Loading {
            self.phase = Phase::Idle;
            self.error = None;
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(|e| e.user_message())
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn current_result(&self) -> Option<&AqiResult> {
        self.current.as_ref().map(|s| &s.result)
    }

    pub fn current_location(&self) -> Option<&LocationQuery> {
        self.current.as_ref().map(|s| &s.location)
    }

    pub fn current_weather(&self) -> Option<&WeatherSnapshot> {
        self.current.as_ref().map(|s| &s.weather)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    pub fn cities(&self) -> &[LocationQuery] {
        &self.cities
    }
}
