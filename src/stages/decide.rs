//! Decide stage: classify the weather into an activity preference.

use std::sync::Arc;
use tracing::{info, instrument};

use super::StageError;
use crate::adapters::Inference;
use crate::state::{ActivityPreference, PlannerState, StagePartial};

/// One inference call asking for a single-token INDOOR/OUTDOOR/BOTH label.
///
/// Total over all inference outputs: anything outside the three-label set is
/// coerced to [`ActivityPreference::Both`].
pub struct DecideStage {
    llm: Arc<dyn Inference>,
}

impl DecideStage {
    pub fn new(llm: Arc<dyn Inference>) -> Self {
        Self { llm }
    }

    #[instrument(skip_all)]
    pub async fn run(&self, state: &PlannerState) -> Result<StagePartial, StageError> {
        let prompt = format!(
            "Based on this weather forecast: {}\n\n\
             Should we prioritize INDOOR, OUTDOOR, or BOTH activities?\n\
             Consider rain, extreme temperatures, etc.\n\
             Answer with only one word: INDOOR, OUTDOOR, or BOTH",
            state.weather_data
        );

        let response = self.llm.complete(&prompt).await?;
        let preference = ActivityPreference::parse_lenient(&response);

        info!(%preference, "decided activity preference");
        Ok(StagePartial::new().with_activity_preference(preference))
    }
}
