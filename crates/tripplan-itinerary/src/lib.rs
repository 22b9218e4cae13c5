//! Day-by-day trip itineraries.
//!
//! `allocator` is the scheduling core: it spreads a pool of classified POIs
//! over the days of a trip, never repeating a POI and preferring indoor
//! venues on rainy days. `planner` wires it to the geocoder, POI source and
//! weather source, and `render` / `reports` turn the results into text.

pub mod allocator;
pub mod dates;
pub mod error;
pub mod planner;
pub mod render;
pub mod reports;
pub mod types;

pub use allocator::{allocate, PlanningContext};
pub use error::PlanError;
pub use planner::Planner;
pub use render::render_markdown;
pub use types::{DayPlan, Itinerary, EVENING_PLACEHOLDER, FREE_PLACEHOLDER};
