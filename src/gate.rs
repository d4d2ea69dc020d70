//! Quality gate: the routing decision after the fan-out stage.
//!
//! The gate chooses between looping back into the search stage and advancing
//! to generation. Two rules, in priority order:
//!
//! 1. At or past the iteration ceiling the gate returns [`Route::Advance`]
//!    unconditionally and makes no inference call. This is the termination
//!    guarantee for the loop.
//! 2. Below the ceiling, one inference call judges the activities leniently.
//!    Only a response containing `NEED_MORE` loops; anything else, including
//!    unparseable output, advances. Defaulting to advance is the fail-safe
//!    against looping forever on ambiguous model output.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::adapters::Inference;
use crate::stages::StageError;
use crate::state::PlannerState;

/// Routing outcome of a gate evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Re-enter the search stage for another fan-out pass.
    RefineSearch,
    /// Proceed to itinerary generation.
    Advance,
}

/// Evaluates activity quality and enforces the iteration ceiling.
pub struct QualityGate {
    llm: Arc<dyn Inference>,
    max_iterations: u32,
}

impl QualityGate {
    pub fn new(llm: Arc<dyn Inference>, max_iterations: u32) -> Self {
        Self {
            llm,
            max_iterations,
        }
    }

    #[instrument(skip_all, fields(iteration = state.search_iterations, ceiling = self.max_iterations))]
    pub async fn evaluate(&self, state: &PlannerState) -> Result<Route, StageError> {
        if state.search_iterations >= self.max_iterations {
            info!("iteration ceiling reached, proceeding with current results");
            return Ok(Route::Advance);
        }

        let prompt = format!(
            "Review these activities for {}:\n{}\n\n\
             Do these include SOME specific venue/place names? Be lenient - if you can \
             identify at least a few actual names (like restaurants, bars, temples, trails), \
             answer SUFFICIENT.\n\
             If it's all generic descriptions with NO specific names, answer NEED_MORE.\n\
             Answer only: SUFFICIENT or NEED_MORE",
            state.city,
            state.activities.join(" "),
        );

        let verdict = self.llm.complete(&prompt).await?.trim().to_uppercase();
        if verdict.contains("NEED_MORE") {
            info!(%verdict, "activities need refinement, searching again");
            Ok(Route::RefineSearch)
        } else {
            info!(%verdict, "activities sufficient, proceeding to generation");
            Ok(Route::Advance)
        }
    }
}
