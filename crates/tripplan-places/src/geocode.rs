//! Forward geocoding: convert a city name into coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use tripplan_core::{build_client, send_with_retry, Config, NetworkError, RetryConfig};

use crate::types::GeoResult;

/// Resolves a free-text city name to a single best match.
///
/// Implementations return `None` both for "no such place" and for upstream
/// failures; the planner treats the two the same way.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, city: &str) -> Option<GeoResult>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    search_url: String,
    retry: RetryConfig,
}

impl NominatimGeocoder {
    pub fn new(config: &Config) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_client(&config.services)?,
            search_url: config.services.nominatim_url.clone(),
            retry: config.retry.clone(),
        })
    }

    async fn search(&self, city: &str) -> Result<Vec<NominatimPlace>, NetworkError> {
        let request = self
            .client
            .get(&self.search_url)
            .query(&[("q", city), ("format", "json"), ("limit", "1")]);

        let response = send_with_retry(&self.retry, request).await?;
        response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self), level = "info")]
    async fn geocode(&self, city: &str) -> Option<GeoResult> {
        let places = match self.search(city).await {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Geocode request for '{}' failed: {}", city, e);
                return None;
            }
        };

        let place = places.into_iter().next()?;

        let (latitude, longitude) = match (place.lat.parse::<f64>(), place.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                tracing::debug!("Unparseable coordinates {}/{}", place.lat, place.lon);
                return None;
            }
        };

        let canonical_name = place
            .display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| city.to_string());

        tracing::info!("Geocoded '{}' to {} ({}, {})", city, canonical_name, latitude, longitude);
        Some(GeoResult {
            latitude,
            longitude,
            canonical_name,
        })
    }
}
