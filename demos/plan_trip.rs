//! End-to-end planning run against the live adapters.
//!
//! Prerequisites:
//! - Ollama running locally with the configured model pulled
//!   (`TRIPSMITH_MODEL`, default `gemma3`)
//! - `OPENWEATHERMAP_API_KEY` set (directly or via `.env`)
//!
//! ```bash
//! cargo run --example plan_trip
//! ```

use std::sync::Arc;

use miette::Result;
use tripsmith::adapters::{DuckDuckGoSearch, OllamaInference, OpenWeatherMap};
use tripsmith::config::PlannerConfig;
use tripsmith::engine::Planner;

#[tokio::main]
async fn main() -> Result<()> {
    tripsmith::telemetry::init_tracing();
    miette::set_panic_hook();

    let config = PlannerConfig::default();
    let planner = Planner::new(
        Arc::new(OllamaInference::new(config.model.clone())),
        Arc::new(OpenWeatherMap::from_env()?),
        Arc::new(DuckDuckGoSearch::new()),
        config,
    );

    let request = "I want to go to Kyoto for 5 days. i want recommendations for \
                   restaurants, bars and attractions. Also maybe a day for hiking";
    let itinerary = planner.plan_trip(request).await?;

    println!("\n=== FINAL RESULT ===\n{itinerary}");
    Ok(())
}
