//! Full planning run against mocked Nominatim, Overpass and Open-Meteo.

use tripplan_core::{Config, RetryConfig};
use tripplan_itinerary::Planner;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.services.nominatim_url = format!("{}/search", server.uri());
    config.services.overpass_url = format!("{}/api/interpreter", server.uri());
    config.services.open_meteo_url = format!("{}/v1/forecast", server.uri());
    config.retry = RetryConfig::none();
    config
}

async fn mount_geocoder(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Hyderabad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": "17.3850", "lon": "78.4867", "display_name": "Hyderabad, Telangana, India" }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_plan_itinerary_end_to_end() {
    let server = MockServer::start().await;
    mount_geocoder(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "elements": [
                { "tags": { "name": "Charminar", "historic": "monument" } },
                { "tags": { "name": "Salar Jung Museum", "tourism": "museum" } },
                { "tags": { "name": "Lumbini Park", "leisure": "park" } },
                { "tags": { "name": "Ravindra Bharathi", "amenity": "theatre" } }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("start_date", "2025-10-02"))
        .and(query_param("end_date", "2025-10-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2025-10-02", "2025-10-03"],
                "temperature_2m_max": [24.0, 31.0],
                "temperature_2m_min": [18.0, 23.0],
                "precipitation_sum": [6.0, 0.0],
                "weathercode": [63, 0]
            }
        })))
        .mount(&server)
        .await;

    let planner = Planner::from_config(&config_for(&server)).unwrap();
    let md = planner
        .plan_itinerary("Hyderabad", "2025-10-02", "2025-10-03", Some(2))
        .await;

    let expected = "\
# Itinerary for Hyderabad, Telangana, India
Dates: 2025-10-02 to 2025-10-03

## Travel Itinerary

| Day | Morning | Afternoon | Evening | Notes |
|---:|---|---|---|---|
| 1 | Salar Jung Museum | Ravindra Bharathi | Dinner / relax | Chance of rain — have indoor alternatives |
| 2 | Charminar | Lumbini Park | Dinner / relax | Good weather for walking; Hot during day |

## POIs considered
- Charminar (historic=monument)
- Salar Jung Museum (tourism=museum)
- Lumbini Park (leisure=park)
- Ravindra Bharathi (amenity=theatre)";

    assert_eq!(md, expected);
}

#[tokio::test]
async fn test_upstream_outages_degrade_to_placeholders() {
    let server = MockServer::start().await;
    mount_geocoder(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let planner = Planner::from_config(&config_for(&server)).unwrap();
    let md = planner
        .plan_itinerary("Hyderabad", "2025-10-02", "2025-10-02", None)
        .await;

    assert!(md.contains(
        "| 1 | Free / explore locally | Free / explore locally | Dinner / relax | No specific weather notes |"
    ));
    assert!(md.ends_with("No POIs found."));
}

#[tokio::test]
async fn test_geocoder_outage_is_an_error_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let planner = Planner::from_config(&config_for(&server)).unwrap();
    let out = planner.poi_report("Hyderabad", None, None).await;
    assert_eq!(out, "ERROR: Could not geocode 'Hyderabad'.");
}
