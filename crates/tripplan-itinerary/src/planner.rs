//! Planning entry points.
//!
//! `Planner` owns the three upstream collaborators. The `*_report` and
//! `plan_itinerary` methods always return text: either the report or a single
//! `ERROR:` line. `build_itinerary` exposes the structured result.

use std::sync::Arc;

use chrono::NaiveDate;
use tripplan_core::{Config, NetworkError, PlannerConfig};
use tripplan_places::{
    classify_pool, GeoResult, Geocoder, NominatimGeocoder, OverpassPoiSource, PoiSource,
};
use tripplan_weather::{classify_day, OpenMeteoProvider, WeatherSource};

use crate::allocator::allocate;
use crate::dates::{parse_optional_range, parse_range, trip_dates};
use crate::error::PlanError;
use crate::render::render_markdown;
use crate::reports;
use crate::types::{DayPlan, Itinerary};

pub struct Planner {
    geocoder: Arc<dyn Geocoder>,
    poi_source: Arc<dyn PoiSource>,
    weather_source: Arc<dyn WeatherSource>,
    settings: PlannerConfig,
}

impl Planner {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        poi_source: Arc<dyn PoiSource>,
        weather_source: Arc<dyn WeatherSource>,
        settings: PlannerConfig,
    ) -> Self {
        Self {
            geocoder,
            poi_source,
            weather_source,
            settings,
        }
    }

    /// Planner backed by Nominatim, Overpass and Open-Meteo
    pub fn from_config(config: &Config) -> Result<Self, NetworkError> {
        Ok(Self::new(
            Arc::new(NominatimGeocoder::new(config)?),
            Arc::new(OverpassPoiSource::new(config)?),
            Arc::new(OpenMeteoProvider::new(config)?),
            config.planner.clone(),
        ))
    }

    pub fn settings(&self) -> &PlannerConfig {
        &self.settings
    }

    async fn locate(&self, city: &str) -> Result<GeoResult, PlanError> {
        self.geocoder
            .geocode(city)
            .await
            .ok_or_else(|| PlanError::GeocodeFailed(city.to_string()))
    }

    /// Plan a trip and return the structured itinerary.
    ///
    /// Dates are checked before any network call. `daily_limit` falls back to
    /// the configured default.
    pub async fn build_itinerary(
        &self,
        city: &str,
        start: &str,
        end: &str,
        daily_limit: Option<usize>,
    ) -> Result<Itinerary, PlanError> {
        let (start, end) = parse_range(start, end)?;
        let geo = self.locate(city).await?;

        let daily_limit = daily_limit.unwrap_or(self.settings.daily_limit);
        let dates = trip_dates(start, end);
        let pool_size = self
            .settings
            .min_pool_size
            .max(daily_limit.saturating_mul(dates.len()).saturating_mul(2));

        let (pois, weather) = tokio::join!(
            self.poi_source.fetch_pois(
                geo.latitude,
                geo.longitude,
                self.settings.itinerary_radius_meters,
                pool_size,
            ),
            self.weather_source
                .fetch_weather(geo.latitude, geo.longitude, start, end),
        );

        tracing::info!(
            "Planning {} days in {} from {} candidate POIs",
            dates.len(),
            geo.canonical_name,
            pois.len()
        );

        let pool = classify_pool(&pois);
        let outlooks: Vec<_> = (0..dates.len()).map(|i| classify_day(&weather, i)).collect();
        let rainy_days: Vec<bool> = outlooks.iter().map(|o| o.rainy).collect();
        let selections = allocate(&pool, &rainy_days, daily_limit);

        let days = dates
            .into_iter()
            .zip(selections)
            .zip(outlooks)
            .map(|((date, selection), outlook)| DayPlan::from_selection(date, &selection, outlook.note))
            .collect();

        Ok(Itinerary {
            destination: geo.canonical_name,
            start,
            end,
            days,
            pois_considered: pois,
        })
    }

    /// Markdown itinerary, or an `ERROR:` line
    pub async fn plan_itinerary(
        &self,
        city: &str,
        start: &str,
        end: &str,
        daily_limit: Option<usize>,
    ) -> String {
        match self.build_itinerary(city, start, end, daily_limit).await {
            Ok(itinerary) => render_markdown(&itinerary),
            Err(e) => {
                tracing::warn!("Itinerary for '{}' not planned: {}", city, e);
                e.report_line()
            }
        }
    }

    /// POIs near a city, or an `ERROR:`/`WARNING:` line
    pub async fn poi_report(&self, city: &str, radius_meters: Option<u32>, limit: Option<usize>) -> String {
        let geo = match self.locate(city).await {
            Ok(g) => g,
            Err(e) => return e.report_line(),
        };

        let pois = self
            .poi_source
            .fetch_pois(
                geo.latitude,
                geo.longitude,
                radius_meters.unwrap_or(self.settings.poi_radius_meters),
                limit.unwrap_or(self.settings.poi_limit),
            )
            .await;

        reports::poi_report(&geo.canonical_name, &pois)
    }

    /// Daily forecast for a city, or an `ERROR:`/`WARNING:` line.
    ///
    /// `start` defaults to `today`; `end` defaults to `start`.
    pub async fn weather_report(
        &self,
        city: &str,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> String {
        let geo = match self.locate(city).await {
            Ok(g) => g,
            Err(e) => return e.report_line(),
        };

        let (start, end) = match parse_optional_range(start, end, today) {
            Ok(d) => d,
            Err(e) => return e.report_line(),
        };

        let weather = self
            .weather_source
            .fetch_weather(geo.latitude, geo.longitude, start, end)
            .await;

        reports::weather_report(&geo.canonical_name, start, end, &weather)
    }
}
