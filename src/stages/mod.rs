//! The five stage functions of the planning pipeline.
//!
//! Each stage is a struct holding the adapter(s) it needs, with an async
//! `run(&self, state) -> Result<StagePartial, StageError>` that reads the
//! shared record and returns only the fields it produced. The engine applies
//! the partial; stages never mutate state directly.
//!
//! Error tiers: weather and search provider failures are converted to
//! descriptive strings inside the returned fields (the run continues
//! degraded), while inference faults and a non-numeric day count propagate as
//! [`StageError`] and abort the run.

use miette::Diagnostic;
use thiserror::Error;

use crate::adapters::AdapterError;

pub mod decide;
pub mod generate;
pub mod parse;
pub mod search;
pub mod weather;

pub use decide::DecideStage;
pub use generate::GenerateStage;
pub use parse::ParseStage;
pub use search::SearchStage;
pub use weather::WeatherStage;

/// Structural faults raised by stage execution.
///
/// These terminate the run. Recoverable provider failures never appear here;
/// they are embedded as text in the state fields instead.
#[derive(Debug, Error, Diagnostic)]
pub enum StageError {
    /// The inference service failed. Not caught by the core.
    #[error("inference failed: {0}")]
    #[diagnostic(code(tripsmith::stage::inference))]
    Inference(#[from] AdapterError),

    /// The extraction response carried a `Days:` line that is not a number.
    ///
    /// Deliberately asymmetric with city/interests, which default silently.
    #[error("day count {value:?} is not a number")]
    #[diagnostic(
        code(tripsmith::stage::invalid_days),
        help("The extraction response must carry a numeric `Days:` line.")
    )]
    InvalidDays {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
