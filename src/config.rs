//! Planner configuration.

/// Default iteration ceiling for the search refinement loop.
pub const DEFAULT_MAX_SEARCH_ITERATIONS: u32 = 2;

const DEFAULT_MODEL: &str = "gemma3";

/// Construction-time configuration for a [`Planner`](crate::engine::Planner).
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Maximum number of times the fan-out stage may run before the quality
    /// gate is forced to advance.
    pub max_search_iterations: u32,
    /// Inference model name handed to the LLM adapter.
    pub model: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_search_iterations: DEFAULT_MAX_SEARCH_ITERATIONS,
            model: Self::resolve_model(None),
        }
    }
}

impl PlannerConfig {
    pub fn new(max_search_iterations: u32) -> Self {
        Self {
            max_search_iterations,
            model: Self::resolve_model(None),
        }
    }

    /// Explicit value wins, then the `TRIPSMITH_MODEL` environment variable
    /// (with `.env` support), then the built-in default.
    fn resolve_model(provided: Option<String>) -> String {
        if let Some(model) = provided {
            return model;
        }
        dotenvy::dotenv().ok();
        std::env::var("TRIPSMITH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Self::resolve_model(Some(model.into()));
        self
    }
}
