//! Daily forecasts from Open-Meteo.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use tripplan_core::{build_client, send_with_retry, Config, NetworkError, RetryConfig};

use crate::types::DailyWeather;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

/// Source of daily forecasts for a coordinate and inclusive date range.
///
/// Index `i` of every returned array belongs to `start + i` days. Upstream
/// failures yield `DailyWeather::default()`.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_weather(&self, lat: f64, lon: f64, start: NaiveDate, end: NaiveDate) -> DailyWeather;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    daily: Option<RawDaily>,
}

/// Entries are kept as raw JSON so one bad value does not discard the whole day set
#[derive(Debug, Default, Deserialize)]
struct RawDaily {
    #[serde(default)]
    time: Vec<Value>,
    #[serde(default)]
    temperature_2m_max: Vec<Value>,
    #[serde(default)]
    temperature_2m_min: Vec<Value>,
    #[serde(default)]
    precipitation_sum: Vec<Value>,
    #[serde(default)]
    weathercode: Vec<Value>,
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    number(value).filter(|n| n.fract() == 0.0).map(|n| n as i64)
}

impl From<RawDaily> for DailyWeather {
    fn from(raw: RawDaily) -> Self {
        Self {
            time: raw
                .time
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            max_temp_c: raw.temperature_2m_max.iter().map(number).collect(),
            min_temp_c: raw.temperature_2m_min.iter().map(number).collect(),
            precip_mm: raw.precipitation_sum.iter().map(number).collect(),
            weather_code: raw.weathercode.iter().map(integer).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: Client,
    forecast_url: String,
    retry: RetryConfig,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_client(&config.services)?,
            forecast_url: config.services.open_meteo_url.clone(),
            retry: config.retry.clone(),
        })
    }

    async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ForecastResponse, NetworkError> {
        let request = self.client.get(&self.forecast_url).query(&[
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("start_date", start.format("%Y-%m-%d").to_string()),
            ("end_date", end.format("%Y-%m-%d").to_string()),
            ("timezone", "auto".to_string()),
        ]);

        let response = send_with_retry(&self.retry, request).await?;
        response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoProvider {
    #[instrument(skip(self), level = "info")]
    async fn fetch_weather(&self, lat: f64, lon: f64, start: NaiveDate, end: NaiveDate) -> DailyWeather {
        match self.forecast(lat, lon, start, end).await {
            Ok(ForecastResponse { daily: Some(raw) }) => {
                let weather = DailyWeather::from(raw);
                tracing::info!("Fetched {} days of weather", weather.time.len());
                weather
            }
            Ok(ForecastResponse { daily: None }) => {
                tracing::warn!("Forecast response had no daily block");
                DailyWeather::default()
            }
            Err(e) => {
                tracing::warn!("Weather lookup failed: {}", e);
                DailyWeather::default()
            }
        }
    }
}
