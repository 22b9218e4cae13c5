use serde::{Deserialize, Serialize};

/// A geocoded city centre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    /// Provider's display name, e.g. "Hyderabad, Telangana, India"
    pub canonical_name: String,
}

/// A point of interest as returned by the POI source.
///
/// `name` is non-empty and unique (case-insensitively) within one fetched list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPoi {
    pub name: String,
    /// Free-text category, e.g. "tourism=museum; amenity=theatre". May be empty.
    pub category_tags: String,
}

impl RawPoi {
    pub fn new(name: impl Into<String>, category_tags: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_tags: category_tags.into(),
        }
    }
}

/// A POI tagged as indoor or outdoor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPoi {
    pub name: String,
    pub category_tags: String,
    pub is_indoor: bool,
}
