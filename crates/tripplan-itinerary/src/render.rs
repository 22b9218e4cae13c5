use crate::types::Itinerary;

/// Render an itinerary as markdown: header, day table, considered-POI appendix
pub fn render_markdown(itinerary: &Itinerary) -> String {
    let mut md = vec![
        format!("# Itinerary for {}", itinerary.destination),
        format!(
            "Dates: {} to {}",
            itinerary.start.format("%Y-%m-%d"),
            itinerary.end.format("%Y-%m-%d")
        ),
        String::new(),
        "## Travel Itinerary".to_string(),
        String::new(),
        "| Day | Morning | Afternoon | Evening | Notes |".to_string(),
        "|---:|---|---|---|---|".to_string(),
    ];

    for (i, day) in itinerary.days.iter().enumerate() {
        md.push(format!(
            "| {} | {} | {} | {} | {} |",
            i + 1,
            day.morning,
            day.afternoon,
            day.evening,
            day.notes
        ));
    }

    md.push(String::new());
    md.push("## POIs considered".to_string());
    if itinerary.pois_considered.is_empty() {
        md.push("No POIs found.".to_string());
    } else {
        md.extend(
            itinerary
                .pois_considered
                .iter()
                .map(|p| format!("- {} ({})", p.name, p.category_tags)),
        );
    }

    md.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DayPlan;
    use chrono::NaiveDate;
    use tripplan_places::RawPoi;

    fn itinerary(pois: Vec<RawPoi>) -> Itinerary {
        let start = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        Itinerary {
            destination: "Hyderabad, Telangana, India".to_string(),
            start,
            end,
            days: vec![
                DayPlan::from_selection(
                    start,
                    &["Charminar".to_string(), "Salar Jung Museum".to_string()],
                    "Good weather for walking".to_string(),
                ),
                DayPlan::from_selection(end, &[], "No specific weather notes".to_string()),
            ],
            pois_considered: pois,
        }
    }

    #[test]
    fn test_render_full_document() {
        let md = render_markdown(&itinerary(vec![
            RawPoi::new("Charminar", "historic=monument"),
            RawPoi::new("Salar Jung Museum", "tourism=museum"),
        ]));

        let expected = "\
# Itinerary for Hyderabad, Telangana, India
Dates: 2025-10-02 to 2025-10-03

## Travel Itinerary

| Day | Morning | Afternoon | Evening | Notes |
|---:|---|---|---|---|
| 1 | Charminar | Salar Jung Museum | Dinner / relax | Good weather for walking |
| 2 | Free / explore locally | Free / explore locally | Dinner / relax | No specific weather notes |

## POIs considered
- Charminar (historic=monument)
- Salar Jung Museum (tourism=museum)";

        assert_eq!(md, expected);
    }

    #[test]
    fn test_render_without_pois() {
        let md = render_markdown(&itinerary(Vec::new()));
        assert!(md.ends_with("## POIs considered\nNo POIs found."));
    }
}
