//! Stage-graph engine: the fixed pipeline with its single bounded back-edge.
//!
//! The topology is parse → weather → decide → search ⟲ → generate, expressed
//! as an explicit finite-state machine over [`StagePoint`]. It is not a
//! general graph executor: no stage may be skipped, there are no other
//! branches, and the only back-edge is Search → Search, guarded by the
//! [`QualityGate`] and bounded by the configured iteration ceiling.
//!
//! Stages execute strictly sequentially; the engine merges each returned
//! [`StagePartial`](crate::state::StagePartial) into the shared record before
//! the next stage runs. The only intra-run concurrency lives inside the
//! search stage itself.

use std::fmt;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::adapters::{Inference, PlaceSearch, WeatherLookup};
use crate::config::PlannerConfig;
use crate::gate::{QualityGate, Route};
use crate::stages::{
    DecideStage, GenerateStage, ParseStage, SearchStage, StageError, WeatherStage,
};
use crate::state::PlannerState;

/// Fallback text when a run finishes without a generated itinerary.
const NO_ITINERARY: &str = "No itinerary generated";

/// Position in the fixed stage graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StagePoint {
    Parse,
    Weather,
    Decide,
    Search,
    Generate,
    Done,
}

impl fmt::Display for StagePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Weather => "weather",
            Self::Decide => "decide",
            Self::Search => "search",
            Self::Generate => "generate",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Errors that abort a planning run.
#[derive(Debug, Error, Diagnostic)]
pub enum PlannerError {
    /// A stage raised a structural fault.
    #[error("{stage} stage failed")]
    #[diagnostic(code(tripsmith::engine::stage))]
    Stage {
        stage: StagePoint,
        #[source]
        #[diagnostic_source]
        source: StageError,
    },

    /// The quality gate's inference call failed.
    #[error("quality gate failed")]
    #[diagnostic(code(tripsmith::engine::gate))]
    Gate(
        #[source]
        #[diagnostic_source]
        StageError,
    ),
}

/// The planning engine: owns the stage functions and drives one run at a time.
///
/// Independent runs share no state, so one `Planner` can serve concurrent
/// `plan_trip` calls as long as the adapters behind it are stateless.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use tripsmith::adapters::{DuckDuckGoSearch, OllamaInference, OpenWeatherMap};
/// use tripsmith::config::PlannerConfig;
/// use tripsmith::engine::Planner;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PlannerConfig::default();
/// let planner = Planner::new(
///     Arc::new(OllamaInference::new(config.model.clone())),
///     Arc::new(OpenWeatherMap::from_env()?),
///     Arc::new(DuckDuckGoSearch::new()),
///     config,
/// );
/// let itinerary = planner.plan_trip("A weekend in Athens for food and ruins").await?;
/// println!("{itinerary}");
/// # Ok(())
/// # }
/// ```
pub struct Planner {
    parse: ParseStage,
    weather: WeatherStage,
    decide: DecideStage,
    search: SearchStage,
    generate: GenerateStage,
    gate: QualityGate,
}

impl Planner {
    pub fn new(
        llm: Arc<dyn Inference>,
        weather: Arc<dyn WeatherLookup>,
        search: Arc<dyn PlaceSearch>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            parse: ParseStage::new(llm.clone()),
            weather: WeatherStage::new(weather),
            decide: DecideStage::new(llm.clone()),
            search: SearchStage::new(search),
            generate: GenerateStage::new(llm.clone()),
            gate: QualityGate::new(llm, config.max_search_iterations),
        }
    }

    /// Plan a trip from a free-text request.
    ///
    /// Runs the full pipeline and returns the itinerary text. Structural
    /// faults (inference transport errors, a non-numeric day count) surface
    /// as [`PlannerError`]; provider failures in weather or search do not —
    /// they appear as embedded error text inside the itinerary inputs.
    #[instrument(skip_all)]
    pub async fn plan_trip(&self, user_request: &str) -> Result<String, PlannerError> {
        let state = self.run(user_request).await?;
        Ok(state
            .final_itinerary
            .unwrap_or_else(|| NO_ITINERARY.to_string()))
    }

    /// Run the pipeline and return the full terminal state.
    ///
    /// `plan_trip` is the usual entry point; this variant exposes the whole
    /// record for callers that want the intermediate fields too.
    #[instrument(skip_all)]
    pub async fn run(&self, user_request: &str) -> Result<PlannerState, PlannerError> {
        let mut state = PlannerState::new(user_request);
        let mut point = StagePoint::Parse;

        loop {
            debug!(stage = %point, "entering stage");
            point = match point {
                StagePoint::Parse => {
                    let partial = self.parse.run(&state).await.map_err(at(point))?;
                    state.apply(partial);
                    StagePoint::Weather
                }
                StagePoint::Weather => {
                    let partial = self.weather.run(&state).await.map_err(at(point))?;
                    state.apply(partial);
                    StagePoint::Decide
                }
                StagePoint::Decide => {
                    let partial = self.decide.run(&state).await.map_err(at(point))?;
                    state.apply(partial);
                    StagePoint::Search
                }
                StagePoint::Search => {
                    let partial = self.search.run(&state).await.map_err(at(point))?;
                    state.apply(partial);
                    // The gate sees the merged record, including the fresh
                    // iteration count it uses to enforce the ceiling.
                    match self.gate.evaluate(&state).await.map_err(PlannerError::Gate)? {
                        Route::RefineSearch => StagePoint::Search,
                        Route::Advance => StagePoint::Generate,
                    }
                }
                StagePoint::Generate => {
                    let partial = self.generate.run(&state).await.map_err(at(point))?;
                    state.apply(partial);
                    StagePoint::Done
                }
                StagePoint::Done => break,
            };
        }

        Ok(state)
    }
}

fn at(stage: StagePoint) -> impl FnOnce(StageError) -> PlannerError {
    move |source| PlannerError::Stage { stage, source }
}
