//! Per-day weather classification: the rain flag that steers POI selection
//! and the note shown in the itinerary's Notes column.

use crate::types::DailyWeather;

/// Precipitation (mm) at or above which a day counts as rainy
pub const RAIN_THRESHOLD_MM: f64 = 2.0;
pub const HEAVY_RAIN_THRESHOLD_MM: f64 = 10.0;
pub const HOT_DAY_MAX_C: f64 = 30.0;
pub const COOL_DAY_MAX_C: f64 = 15.0;

pub const NO_WEATHER_NOTES: &str = "No specific weather notes";

#[derive(Debug, Clone, PartialEq)]
pub struct DayOutlook {
    pub rainy: bool,
    pub note: String,
}

pub fn is_rainy(weather: &DailyWeather, offset: usize) -> bool {
    weather
        .precip_at(offset)
        .is_some_and(|p| p >= RAIN_THRESHOLD_MM)
}

fn precipitation_note(precip_mm: f64) -> &'static str {
    if precip_mm >= HEAVY_RAIN_THRESHOLD_MM {
        "Heavy rain expected — favor indoor activities"
    } else if precip_mm >= RAIN_THRESHOLD_MM {
        "Chance of rain — have indoor alternatives"
    } else if precip_mm > 0.0 {
        "Light showers possible"
    } else {
        "Good weather for walking"
    }
}

fn temperature_note(max_c: f64) -> Option<&'static str> {
    if max_c >= HOT_DAY_MAX_C {
        Some("Hot during day")
    } else if max_c <= COOL_DAY_MAX_C {
        Some("Cool day — bring a jacket")
    } else {
        None
    }
}

/// Note for one day: precipitation tier, then temperature tier.
///
/// A tier whose inputs are missing contributes nothing. The temperature tier
/// needs both the max and the min for the day even though only the max decides.
pub fn weather_note(weather: &DailyWeather, offset: usize) -> String {
    let mut parts = Vec::with_capacity(2);

    if let Some(precip) = weather.precip_at(offset) {
        parts.push(precipitation_note(precip));
    }

    if let (Some(max_c), Some(_)) = (weather.max_temp_at(offset), weather.min_temp_at(offset)) {
        if let Some(note) = temperature_note(max_c) {
            parts.push(note);
        }
    }

    if parts.is_empty() {
        NO_WEATHER_NOTES.to_string()
    } else {
        parts.join("; ")
    }
}

pub fn classify_day(weather: &DailyWeather, offset: usize) -> DayOutlook {
    DayOutlook {
        rainy: is_rainy(weather, offset),
        note: weather_note(weather, offset),
    }
}
