//! Points of interest around a coordinate, via the Overpass API.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use tripplan_core::{build_client, send_with_retry, Config, NetworkError, RetryConfig};

use crate::types::RawPoi;

/// OSM keys whose values make up a POI's category text, in output order
const CATEGORY_KEYS: [&str; 4] = ["tourism", "historic", "leisure", "amenity"];

/// Server-side time budget for one Overpass query
const QUERY_TIMEOUT_SECS: u64 = 15;

/// Source of candidate POIs near a coordinate.
///
/// The returned list is ordered, holds at most `limit` entries and has no two
/// entries whose trimmed names match case-insensitively. Upstream failures
/// yield an empty list.
#[async_trait]
pub trait PoiSource: Send + Sync {
    async fn fetch_pois(&self, lat: f64, lon: f64, radius_meters: u32, limit: usize) -> Vec<RawPoi>;
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct OverpassPoiSource {
    client: Client,
    interpreter_url: String,
    retry: RetryConfig,
}

impl OverpassPoiSource {
    pub fn new(config: &Config) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_client(&config.services)?,
            interpreter_url: config.services.overpass_url.clone(),
            retry: config.retry.clone(),
        })
    }

    async fn query(&self, body: String) -> Result<OverpassResponse, NetworkError> {
        let request = self.client.post(&self.interpreter_url).body(body);
        let response = send_with_retry(&self.retry, request).await?;
        response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PoiSource for OverpassPoiSource {
    #[instrument(skip(self), level = "info")]
    async fn fetch_pois(&self, lat: f64, lon: f64, radius_meters: u32, limit: usize) -> Vec<RawPoi> {
        let body = build_query(lat, lon, radius_meters, limit);
        match self.query(body).await {
            Ok(response) => {
                let pois = collect_pois(response.elements, limit);
                tracing::info!("Overpass returned {} usable POIs", pois.len());
                pois
            }
            Err(e) => {
                tracing::warn!("POI lookup failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Overpass QL for named attractions, heritage sites, leisure areas and
/// culture venues within `radius` metres
fn build_query(lat: f64, lon: f64, radius: u32, limit: usize) -> String {
    let around = format!("around:{},{},{}", radius, lat, lon);
    format!(
        "[out:json][timeout:{timeout}];\n\
         (\n\
           node({around})[\"tourism\"];\n\
           way({around})[\"tourism\"];\n\
           node({around})[\"historic\"];\n\
           way({around})[\"historic\"];\n\
           node({around})[\"leisure\"];\n\
           way({around})[\"leisure\"];\n\
           node({around})[\"amenity\"~\"museum|theatre|gallery|marketplace|park\"];\n\
         );\n\
         out center {limit};\n",
        timeout = QUERY_TIMEOUT_SECS,
        around = around,
        limit = limit,
    )
}

fn category_text(tags: &HashMap<String, String>) -> String {
    CATEGORY_KEYS
        .iter()
        .filter_map(|key| tags.get(*key).map(|value| format!("{}={}", key, value)))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Keep named elements, drop repeated names, stop at `limit`
fn collect_pois(elements: Vec<OverpassElement>, limit: usize) -> Vec<RawPoi> {
    let mut seen = HashSet::new();
    let mut pois = Vec::new();

    for element in elements {
        if pois.len() >= limit {
            break;
        }
        let Some(name) = element.tags.get("name") else {
            continue;
        };
        let key = name.trim().to_lowercase();
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        pois.push(RawPoi::new(name.as_str(), category_text(&element.tags)));
    }

    pois
}
