//! Plain-text reports for the POI-only and weather-only entry points.

use chrono::NaiveDate;
use tripplan_places::RawPoi;
use tripplan_weather::DailyWeather;

/// Whole numbers keep their decimal point: `21.0`, not `21`
fn value_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:?}", v))
}

/// Numbered POI list, or a `WARNING:` line when the list is empty
pub fn poi_report(place: &str, pois: &[RawPoi]) -> String {
    if pois.is_empty() {
        return format!("WARNING: No POIs found for {}.", place);
    }

    let mut lines = Vec::with_capacity(pois.len() + 1);
    lines.push(format!("Top {} POIs near {}:", pois.len(), place));
    lines.extend(
        pois.iter()
            .enumerate()
            .map(|(i, p)| format!("{}. {} ({})", i + 1, p.name, p.category_tags)),
    );
    lines.join("\n")
}

/// One line per forecast day, or a `WARNING:` line when there is no data
pub fn weather_report(place: &str, start: NaiveDate, end: NaiveDate, weather: &DailyWeather) -> String {
    let start = start.format("%Y-%m-%d");
    let end = end.format("%Y-%m-%d");

    if weather.is_empty() {
        return format!(
            "WARNING: No weather data for {} between {} and {}.",
            place, start, end
        );
    }

    let mut lines = vec![format!("Weather for {} ({} to {}):", place, start, end)];
    for (i, date) in weather.time.iter().enumerate() {
        let mut line = format!(
            "- {}: max {}°C, min {}°C, precipitation {} mm",
            date,
            value_or_na(weather.max_temp_at(i)),
            value_or_na(weather.min_temp_at(i)),
            value_or_na(weather.precip_at(i)),
        );
        if let Some(condition) = weather.condition_at(i) {
            line.push_str(", ");
            line.push_str(condition.description());
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poi_report_lists_in_order() {
        let pois = vec![
            RawPoi::new("Charminar", "historic=monument"),
            RawPoi::new("Lumbini Park", "leisure=park"),
        ];
        assert_eq!(
            poi_report("Hyderabad", &pois),
            "Top 2 POIs near Hyderabad:\n1. Charminar (historic=monument)\n2. Lumbini Park (leisure=park)"
        );
    }

    #[test]
    fn test_poi_report_empty_warns() {
        assert_eq!(
            poi_report("Hyderabad", &[]),
            "WARNING: No POIs found for Hyderabad."
        );
    }

    #[test]
    fn test_weather_report_fills_gaps_with_na() {
        let weather = DailyWeather {
            time: vec!["2025-10-02".into(), "2025-10-03".into()],
            max_temp_c: vec![Some(31.5), None],
            min_temp_c: vec![Some(22.25)],
            precip_mm: vec![Some(0.0), Some(4.5)],
            weather_code: vec![Some(0)],
        };
        let start = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();

        assert_eq!(
            weather_report("Hyderabad", start, end, &weather),
            "Weather for Hyderabad (2025-10-02 to 2025-10-03):\n\
             - 2025-10-02: max 31.5°C, min 22.25°C, precipitation 0.0 mm, Clear\n\
             - 2025-10-03: max N/A°C, min N/A°C, precipitation 4.5 mm"
        );
    }

    #[test]
    fn test_whole_values_keep_decimal_point() {
        assert_eq!(value_or_na(Some(21.0)), "21.0");
        assert_eq!(value_or_na(Some(0.0)), "0.0");
        assert_eq!(value_or_na(Some(30.5)), "30.5");
        assert_eq!(value_or_na(Some(-3.0)), "-3.0");
        assert_eq!(value_or_na(None), "N/A");
    }

    #[test]
    fn test_weather_report_empty_warns() {
        let day = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        assert_eq!(
            weather_report("Hyderabad", day, day, &DailyWeather::default()),
            "WARNING: No weather data for Hyderabad between 2025-10-02 and 2025-10-02."
        );
    }
}
