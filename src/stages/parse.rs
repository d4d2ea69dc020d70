//! Parse stage: extract city, day count, and interests from the raw request.

use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::StageError;
use crate::adapters::Inference;
use crate::state::{PlannerState, StagePartial};

const DEFAULT_CITY: &str = "Unknown";
const DEFAULT_DAYS: u32 = 5;
const DEFAULT_INTERESTS: &str = "sightseeing";

/// Sends one extraction prompt and parses the `Key: value` response
/// permissively.
///
/// Missing or unrecognized keys fall back to defaults; a present but
/// non-numeric day count is a hard failure ([`StageError::InvalidDays`]).
pub struct ParseStage {
    llm: Arc<dyn Inference>,
}

impl ParseStage {
    pub fn new(llm: Arc<dyn Inference>) -> Self {
        Self { llm }
    }

    #[instrument(skip_all)]
    pub async fn run(&self, state: &PlannerState) -> Result<StagePartial, StageError> {
        let prompt = format!(
            "Extract the following from this travel request: \"{}\"\n\
             Return ONLY in this format:\n\
             City: <city name>\n\
             Days: <number>\n\
             Interests: <comma-separated interests>",
            state.user_request
        );

        let response = self.llm.complete(&prompt).await?;
        let fields = extract_fields(&response);

        let city = fields
            .get("city")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        let days = match fields.get("days") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|source| StageError::InvalidDays {
                    value: raw.clone(),
                    source,
                })?
                .max(1),
            None => DEFAULT_DAYS,
        };
        let interests = fields
            .get("interests")
            .cloned()
            .unwrap_or_else(|| DEFAULT_INTERESTS.to_string());

        info!(%city, days, %interests, "parsed travel request");
        Ok(StagePartial::new()
            .with_city(city)
            .with_days(days)
            .with_interests(interests))
    }
}

/// Build a lower-cased key → value map from `Key: value` lines.
///
/// Lines without a `": "` separator are skipped; the value keeps everything
/// after the first separator.
fn extract_fields(response: &str) -> FxHashMap<String, String> {
    let mut fields = FxHashMap::default();
    for line in response.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((key, value)) = line.split_once(": ") {
            fields.insert(key.to_lowercase(), value.to_string());
        }
    }
    fields
}
