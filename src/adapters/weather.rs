//! OpenWeatherMap forecast client.
//!
//! The 5-day/3-hour endpoint returns eight entries per day; entry `(k-1)*8`
//! lands at the same time of day for each day `k`, so the summary samples
//! those indices. A day whose index is past the end of the series degrades to
//! `"Day k: Could not get forecast"` for that day only.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use super::{AdapterError, WeatherLookup};

/// Maximum forecast horizon the provider supports, in days.
pub const FORECAST_HORIZON_DAYS: u32 = 5;

/// 3-hour intervals per day in the forecast series.
const ENTRIES_PER_DAY: usize = 8;

/// Default OpenWeatherMap API origin.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";

/// Forecast payload from the `/data/2.5/forecast` endpoint.
///
/// Only the fields the summary needs are deserialized.
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(rename = "list")]
    pub entries: Vec<ForecastEntry>,
}

/// One 3-hour forecast interval.
#[derive(Clone, Debug, Deserialize)]
pub struct ForecastEntry {
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
}

impl ForecastEntry {
    /// Build an entry from a condition label and a metric temperature.
    pub fn new(condition: impl Into<String>, temp: f64) -> Self {
        Self {
            weather: vec![WeatherCondition {
                main: condition.into(),
            }],
            main: MainReadings { temp },
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}

/// Reqwest-backed [`WeatherLookup`] against the OpenWeatherMap forecast API.
///
/// Stateless apart from the connection pool; safe to share across concurrent
/// independent runs. The base URL is injectable so tests can point the client
/// at a local mock server.
pub struct OpenWeatherMap {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMap {
    /// Create a client against the public API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom origin (used by tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Create a client from the `OPENWEATHERMAP_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AdapterError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("OPENWEATHERMAP_API_KEY").map_err(|_| {
            AdapterError::MissingConfig {
                what: "OPENWEATHERMAP_API_KEY",
            }
        })?;
        Ok(Self::new(api_key))
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherMap {
    #[instrument(skip(self))]
    async fn forecast(&self, city: &str, days: u32) -> Result<String, AdapterError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .error_for_status()?;
        let payload: ForecastResponse = response.json().await?;
        Ok(summarize_forecast(&payload.entries, days))
    }
}

/// Summarize a 3-hour forecast series into one line per day.
///
/// Samples entry `(k-1)*8` for day `k`, caps the horizon at
/// [`FORECAST_HORIZON_DAYS`], and joins the days with `" | "`.
///
/// ```rust
/// use tripsmith::adapters::weather::{ForecastEntry, summarize_forecast};
///
/// let entries: Vec<ForecastEntry> =
///     (0..16).map(|_| ForecastEntry::new("Clear", 25.5)).collect();
/// assert_eq!(
///     summarize_forecast(&entries, 2),
///     "Day 1: Clear, 25.5°C | Day 2: Clear, 25.5°C"
/// );
/// ```
#[must_use]
pub fn summarize_forecast(entries: &[ForecastEntry], days: u32) -> String {
    let horizon = days.min(FORECAST_HORIZON_DAYS) as usize;
    let mut lines = Vec::with_capacity(horizon);
    for day in 0..horizon {
        let line = match entries.get(day * ENTRIES_PER_DAY) {
            Some(entry) => {
                let condition = entry
                    .weather
                    .first()
                    .map(|w| w.main.as_str())
                    .unwrap_or("Unknown");
                format!(
                    "Day {}: {}, {}°C",
                    day + 1,
                    condition,
                    format_temp(entry.main.temp)
                )
            }
            None => format!("Day {}: Could not get forecast", day + 1),
        };
        lines.push(line);
    }
    lines.join(" | ")
}

// Whole-degree readings keep one decimal place ("22.0°C", not "22°C").
fn format_temp(temp: f64) -> String {
    if temp.fract() == 0.0 {
        format!("{temp:.1}")
    } else {
        format!("{temp}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temps_keep_a_decimal_when_whole() {
        assert_eq!(format_temp(22.0), "22.0");
        assert_eq!(format_temp(25.5), "25.5");
        assert_eq!(format_temp(-3.0), "-3.0");
        assert_eq!(format_temp(18.25), "18.25");
    }
}
