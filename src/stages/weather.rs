//! Weather stage: fetch the forecast summary, degrading on provider failure.

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::StageError;
use crate::adapters::{FORECAST_HORIZON_DAYS, WeatherLookup};
use crate::state::{PlannerState, StagePartial};

/// Fetches the forecast for the parsed city, capped at the provider horizon.
///
/// A provider failure becomes `"Error fetching weather: …"` in
/// `weather_data`; the pipeline continues with degraded information rather
/// than aborting.
pub struct WeatherStage {
    weather: Arc<dyn WeatherLookup>,
}

impl WeatherStage {
    pub fn new(weather: Arc<dyn WeatherLookup>) -> Self {
        Self { weather }
    }

    #[instrument(skip_all, fields(city = %state.city))]
    pub async fn run(&self, state: &PlannerState) -> Result<StagePartial, StageError> {
        let horizon = state.days.min(FORECAST_HORIZON_DAYS);
        let weather_data = match self.weather.forecast(&state.city, horizon).await {
            Ok(summary) => {
                info!(%summary, "fetched forecast");
                summary
            }
            Err(e) => {
                warn!(error = %e, "weather lookup failed, continuing degraded");
                format!("Error fetching weather: {e}")
            }
        };
        Ok(StagePartial::new().with_weather_data(weather_data))
    }
}
