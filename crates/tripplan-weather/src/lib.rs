//! Weather for the trip planner
//!
//! Daily forecasts come from the Open-Meteo API. The `conditions` module turns
//! one day of forecast into the rain flag and the human-readable note used by
//! the itinerary.

pub mod conditions;
pub mod provider;
pub mod types;

pub use conditions::{classify_day, DayOutlook};
pub use provider::{OpenMeteoProvider, WeatherSource};
pub use types::*;
