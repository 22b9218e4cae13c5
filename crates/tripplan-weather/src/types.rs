use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert a WMO weather code.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i64) -> Option<Self> {
        let condition = match code {
            0 => Self::Clear,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 | 66 | 67 => Self::Sleet, // freezing drizzle / rain
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => return None,
        };
        Some(condition)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

/// Daily forecast for a whole trip.
///
/// Every array is indexed by day offset from the trip's start date. An entry
/// is `None` when the upstream value was null or not a number; a short array
/// means "no data" for the days past its end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    /// ISO dates as reported upstream
    pub time: Vec<String>,
    pub max_temp_c: Vec<Option<f64>>,
    pub min_temp_c: Vec<Option<f64>>,
    pub precip_mm: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i64>>,
}

impl DailyWeather {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
            && self.max_temp_c.is_empty()
            && self.min_temp_c.is_empty()
            && self.precip_mm.is_empty()
            && self.weather_code.is_empty()
    }

    pub fn precip_at(&self, offset: usize) -> Option<f64> {
        self.precip_mm.get(offset).copied().flatten()
    }

    pub fn max_temp_at(&self, offset: usize) -> Option<f64> {
        self.max_temp_c.get(offset).copied().flatten()
    }

    pub fn min_temp_at(&self, offset: usize) -> Option<f64> {
        self.min_temp_c.get(offset).copied().flatten()
    }

    pub fn condition_at(&self, offset: usize) -> Option<WeatherCondition> {
        self.weather_code
            .get(offset)
            .copied()
            .flatten()
            .and_then(WeatherCondition::from_wmo_code)
    }
}
