//! Generate stage: compose the final itinerary text.

use std::sync::Arc;
use tracing::{info, instrument};

use super::StageError;
use crate::adapters::Inference;
use crate::state::{PlannerState, StagePartial};

/// One inference call with the day-by-day itinerary template.
///
/// The response is stored verbatim as the terminal artifact; no further
/// parsing or validation happens downstream.
pub struct GenerateStage {
    llm: Arc<dyn Inference>,
}

impl GenerateStage {
    pub fn new(llm: Arc<dyn Inference>) -> Self {
        Self { llm }
    }

    #[instrument(skip_all, fields(city = %state.city, days = state.days))]
    pub async fn run(&self, state: &PlannerState) -> Result<StagePartial, StageError> {
        let days = state.days;
        let city = &state.city;
        let prompt = format!(
            "Create a {days}-day travel itinerary for {city}.\n\n\
             Weather: {weather}\n\
             Activities: {activities}\n\n\
             Create a detailed, practical itinerary that:\n\
             - Balances activities with rest time\n\
             - Includes specific timing and logistics\n\
             - Suggests backup options for bad weather\n\
             - Uses actual place names from the activities data provided\n\n\
             Return ONLY in this format:\n\
             # {days}-Day Itinerary for {city}\n\n\
             ## Day 1: [Weather]\n\
             - **Morning**: [Activity with specific place name]\n\
             - **Lunch**: [Restaurant name and cuisine type]\n\
             - **Afternoon**: [Activity with specific place name]\n\
             - **Evening**: [Activity/Dinner with specific place name]\n\
             - **Weather**: [Expected conditions and recommendations]\n\
             - **Backup Plan**: [Alternative if weather is bad]\n\n\
             ## Day 2: [Weather]\n\
             [Same structure...]\n\n\
             [Repeat for all {days} days]",
            weather = state.weather_data,
            activities = state.activities.join(" "),
        );

        let itinerary = self.llm.complete(&prompt).await?;
        info!(length = itinerary.len(), "itinerary generated");
        Ok(StagePartial::new().with_final_itinerary(itinerary))
    }
}
