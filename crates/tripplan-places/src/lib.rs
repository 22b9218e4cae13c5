//! Places for the trip planner: forward geocoding of city names and
//! points-of-interest discovery around a coordinate.
//!
//! Both collaborators talk to OpenStreetMap services (Nominatim and Overpass),
//! need no API key, and never return errors to their callers: upstream
//! failures are logged and degrade to "not found" / an empty list.

pub mod classify;
pub mod geocode;
pub mod poi;
pub mod types;

pub use classify::{classify_poi, classify_pool, is_indoor, INDOOR_KEYWORDS};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use poi::{OverpassPoiSource, PoiSource};
pub use types::*;
