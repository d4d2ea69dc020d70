//! # Tripsmith: stage-graph travel itinerary planner
//!
//! Tripsmith turns a free-text travel request into a multi-day itinerary by
//! running a fixed pipeline of stages over one shared state record:
//!
//! ```text
//! parse → weather → decide → search ⟲ → generate
//! ```
//!
//! The search stage fans out into one concurrent place lookup per interest
//! and is the only stage with a back-edge: after each pass a quality gate
//! either loops back for refinement or advances to generation, bounded by a
//! configured iteration ceiling.
//!
//! ## Core concepts
//!
//! - **State record**: one [`state::PlannerState`] per run, populated
//!   progressively; stages return [`state::StagePartial`] updates the engine
//!   merges field-by-field.
//! - **Stages**: async structs in [`stages`] holding the adapter(s) they
//!   need; strictly sequential except for the fan-out inside the search
//!   stage.
//! - **Quality gate**: [`gate::QualityGate`] routes Search → Search or
//!   Search → Generate and enforces the iteration ceiling.
//! - **Adapters**: the [`adapters`] traits isolate the inference, weather,
//!   and place-search collaborators; provider failures in weather/search are
//!   data, inference failures are faults.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tripsmith::adapters::{DuckDuckGoSearch, OllamaInference, OpenWeatherMap};
//! use tripsmith::config::PlannerConfig;
//! use tripsmith::engine::Planner;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PlannerConfig::default();
//! let planner = Planner::new(
//!     Arc::new(OllamaInference::new(config.model.clone())),
//!     Arc::new(OpenWeatherMap::from_env()?),
//!     Arc::new(DuckDuckGoSearch::new()),
//!     config,
//! );
//!
//! let itinerary = planner
//!     .plan_trip("I want to go to Kyoto for 5 days, mostly temples and food")
//!     .await?;
//! println!("{itinerary}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Module guide
//!
//! - [`state`] - shared state record and partial-update merging
//! - [`stages`] - the five stage functions
//! - [`gate`] - quality gate and loop routing
//! - [`engine`] - the fixed stage graph and run entry point
//! - [`adapters`] - external service traits and live clients
//! - [`config`] - construction-time configuration
//! - [`telemetry`] - tracing bootstrap

pub mod adapters;
pub mod config;
pub mod engine;
pub mod gate;
pub mod stages;
pub mod state;
pub mod telemetry;
