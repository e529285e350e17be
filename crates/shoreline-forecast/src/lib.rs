//! Weather outlook for Shoreline.
//!
//! Fetches the public multi-day forecast, parses it into [`ForecastDay`]
//! records and classifies forecast text into icon categories.

pub mod client;
pub mod state;
pub mod types;

pub use client::{parse_outlook, ForecastClient};
pub use state::{FetchPhase, FetchTracker};
pub use types::*;
