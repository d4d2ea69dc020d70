//! Fan-out stage: one concurrent place search per interest.
//!
//! Subtasks run concurrently and are joined before the stage returns; no
//! subtask outlives the stage boundary and no subtask's failure cancels the
//! others. Each subtask reads only its own (city, category) pair and fills
//! its own slot by position, so results stay aligned one-to-one with the
//! interests list. A failing subtask yields embedded error text in its slot.
//!
//! Re-running is safe: every invocation recomputes `activities` from scratch
//! and bumps `search_iterations` by exactly 1.

use futures_util::future;
use std::sync::Arc;
use tracing::{info, instrument};

use super::StageError;
use crate::adapters::PlaceSearch;
use crate::state::{PlannerState, StagePartial};

pub struct SearchStage {
    search: Arc<dyn PlaceSearch>,
}

impl SearchStage {
    pub fn new(search: Arc<dyn PlaceSearch>) -> Self {
        Self { search }
    }

    #[instrument(skip_all, fields(city = %state.city))]
    pub async fn run(&self, state: &PlannerState) -> Result<StagePartial, StageError> {
        let iteration = state.search_iterations + 1;
        let interests: Vec<String> = state
            .interests
            .split(',')
            .map(|interest| interest.trim().to_string())
            .collect();
        let modifier = state.activity_preference.category_modifier();

        info!(
            iteration,
            preference = %state.activity_preference,
            interests = %state.interests,
            "fanning out place searches"
        );

        let lookups = interests.iter().map(|interest| {
            let category = format!("{modifier}{interest}");
            async move {
                match self.search.find_places(&state.city, &category).await {
                    Ok(found) => found,
                    Err(e) => format!("Error searching for {category}: {e}"),
                }
            }
        });
        let results = future::join_all(lookups).await;

        let activities: Vec<String> = interests
            .iter()
            .zip(results)
            .map(|(interest, found)| format!("{}: {found}", title_case(interest)))
            .collect();

        Ok(StagePartial::new()
            .with_activities(activities)
            .with_search_iterations(iteration))
    }
}

// First letter of each whitespace-separated word upper-cased, rest lowered.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
