//! Indoor/outdoor tagging from a POI's category text.

use crate::types::{ClassifiedPoi, RawPoi};

/// Category substrings that mark a POI as indoor
pub const INDOOR_KEYWORDS: [&str; 5] = ["museum", "theatre", "gallery", "library", "cinema"];

/// True if any indoor keyword occurs in the category text, ignoring case
pub fn is_indoor(category_tags: &str) -> bool {
    let lowered = category_tags.to_lowercase();
    INDOOR_KEYWORDS.iter().any(|k| lowered.contains(k))
}

pub fn classify_poi(poi: &RawPoi) -> ClassifiedPoi {
    ClassifiedPoi {
        name: poi.name.clone(),
        category_tags: poi.category_tags.clone(),
        is_indoor: is_indoor(&poi.category_tags),
    }
}

/// Classify a whole pool, preserving source order
pub fn classify_pool(pois: &[RawPoi]) -> Vec<ClassifiedPoi> {
    pois.iter().map(classify_poi).collect()
}
