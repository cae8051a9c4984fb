//! Session logic sitting between the AQI engine and a presentation layer.
//!
//! This crate provides:
//! - `session`: the query controller owning current result, history and markers
//! - `resolve`: the provider round trip behind a single resolution
//! - `history`: bounded trend of recent readings
//! - `markers`: keyed registry of map markers with bulk seeding
//! - `error`: the resolution error taxonomy

pub mod error;
pub mod history;
pub mod markers;
pub mod resolve;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ResolveError;
pub use session::{Phase, Resolution, Session};
