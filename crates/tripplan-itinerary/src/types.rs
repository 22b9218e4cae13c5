use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tripplan_places::RawPoi;

/// Morning/afternoon text when no POI is left for the slot
pub const FREE_PLACEHOLDER: &str = "Free / explore locally";
/// Evening text when no POI is left for the slot
pub const EVENING_PLACEHOLDER: &str = "Dinner / relax";

/// One day of the itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub notes: String,
    /// Leading slots that hold a POI; the rest are placeholders
    #[serde(default)]
    pub scheduled: usize,
}

impl DayPlan {
    /// Map a day's selection onto slots in selection order.
    ///
    /// Anything past the third POI is not shown.
    pub fn from_selection(date: NaiveDate, selection: &[String], notes: String) -> Self {
        let slot = |i: usize, placeholder: &str| {
            selection
                .get(i)
                .cloned()
                .unwrap_or_else(|| placeholder.to_string())
        };

        Self {
            date,
            morning: slot(0, FREE_PLACEHOLDER),
            afternoon: slot(1, FREE_PLACEHOLDER),
            evening: slot(2, EVENING_PLACEHOLDER),
            notes,
            scheduled: selection.len().min(3),
        }
    }

    pub fn slots(&self) -> [&str; 3] {
        [self.morning.as_str(), self.afternoon.as_str(), self.evening.as_str()]
    }

    /// Slot values that hold a POI rather than a placeholder
    pub fn scheduled_pois(&self) -> impl Iterator<Item = &str> {
        self.slots().into_iter().take(self.scheduled)
    }
}

/// A fully planned trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Geocoder's canonical name for the destination
    pub destination: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayPlan>,
    /// The candidate pool in source order
    pub pois_considered: Vec<RawPoi>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 2).unwrap()
    }

    #[test]
    fn test_empty_selection_uses_placeholders() {
        let day = DayPlan::from_selection(date(), &[], "n".into());
        assert_eq!(day.slots(), [FREE_PLACEHOLDER, FREE_PLACEHOLDER, EVENING_PLACEHOLDER]);
        assert_eq!(day.scheduled_pois().count(), 0);
    }

    #[test]
    fn test_partial_selection() {
        let day = DayPlan::from_selection(date(), &["Charminar".to_string()], "n".into());
        assert_eq!(day.slots(), ["Charminar", FREE_PLACEHOLDER, EVENING_PLACEHOLDER]);
    }

    #[test]
    fn test_extra_selection_is_hidden() {
        let selection: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let day = DayPlan::from_selection(date(), &selection, "n".into());
        assert_eq!(day.slots(), ["A", "B", "C"]);
        assert_eq!(day.scheduled_pois().collect::<Vec<_>>(), ["A", "B", "C"]);
    }

    #[test]
    fn test_poi_named_like_placeholder_is_scheduled() {
        let selection = vec![EVENING_PLACEHOLDER.to_string(), FREE_PLACEHOLDER.to_string()];
        let day = DayPlan::from_selection(date(), &selection, "n".into());
        assert_eq!(
            day.scheduled_pois().collect::<Vec<_>>(),
            [EVENING_PLACEHOLDER, FREE_PLACEHOLDER]
        );
        assert_eq!(day.slots(), [EVENING_PLACEHOLDER, FREE_PLACEHOLDER, EVENING_PLACEHOLDER]);
    }
}
