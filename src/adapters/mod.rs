//! External service seams consumed by the pipeline.
//!
//! Three independent collaborator interfaces: [`Inference`] (prompt → text),
//! [`WeatherLookup`] (city + days → forecast summary), and [`PlaceSearch`]
//! (city + category → free-text results). All are `Send + Sync` trait objects
//! so independent runs can share one stateless client.
//!
//! Failure handling differs by seam and that difference is load-bearing:
//! inference faults are structural — the stages propagate them and the run
//! aborts — while weather and search faults are converted to descriptive
//! strings at the stage boundary and the run continues degraded.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

pub mod llm;
pub mod search;
pub mod weather;

pub use llm::OllamaInference;
pub use search::DuckDuckGoSearch;
pub use weather::{FORECAST_HORIZON_DAYS, OpenWeatherMap};

/// Language inference service: one prompt in, one completion out.
///
/// No streaming. A fault here is not caught by the core; it aborts the run.
#[async_trait]
pub trait Inference: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AdapterError>;
}

/// Weather data provider.
///
/// On success returns the pipe-delimited `"Day k: <condition>, <temp>°C"`
/// summary for `min(days, 5)` entries. Callers treat failures as data.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn forecast(&self, city: &str, days: u32) -> Result<String, AdapterError>;
}

/// Place/attraction search provider.
///
/// Returns a single free-text result string for a category within a city.
/// Callers treat failures as data.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn find_places(&self, city: &str, category: &str) -> Result<String, AdapterError>;
}

/// Errors surfaced by adapter implementations.
#[derive(Debug, Error, Diagnostic)]
pub enum AdapterError {
    /// Transport-level HTTP failure.
    #[error("http request failed: {0}")]
    #[diagnostic(code(tripsmith::adapter::http))]
    Http(#[from] reqwest::Error),

    /// The provider responded but the response was unusable.
    #[error("provider error ({provider}): {message}")]
    #[diagnostic(code(tripsmith::adapter::provider))]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// A required configuration value is absent.
    #[error("missing configuration: {what}")]
    #[diagnostic(
        code(tripsmith::adapter::missing_config),
        help("Set the environment variable or pass the value explicitly.")
    )]
    MissingConfig { what: &'static str },
}
