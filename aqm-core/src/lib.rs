pub mod advisory;
pub mod aqi;
pub mod breakpoint;
pub mod category;
pub mod error;
pub mod location;
#[cfg(feature = "api")]
pub mod openweather;
pub mod pollutant;
pub mod provider;
pub mod weather;
