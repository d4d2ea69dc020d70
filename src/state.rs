//! Shared planner state and partial-update merging.
//!
//! A run owns exactly one [`PlannerState`]. Stages receive a read-only view
//! and return a [`StagePartial`]; the engine merges each partial back into the
//! record with [`PlannerState::apply`] before the next stage runs, so stages
//! never observe each other mid-flight.
//!
//! The merge is shallow and last-write-wins per field: a stage that returns
//! `Some` for a field replaces that field wholesale, and fields left `None`
//! are untouched. Later stages depend on this overwrite behavior — the search
//! stage in particular recomputes `activities` from scratch on every loop
//! iteration rather than accumulating across passes.
//!
//! # Examples
//!
//! ```rust
//! use tripsmith::state::{PlannerState, StagePartial};
//!
//! let mut state = PlannerState::new("Three days in Lisbon for food and fado");
//! state.apply(
//!     StagePartial::new()
//!         .with_city("Lisbon")
//!         .with_days(3)
//!         .with_interests("food, fado"),
//! );
//! assert_eq!(state.city, "Lisbon");
//! assert_eq!(state.days, 3);
//! // Untouched fields keep their previous values.
//! assert_eq!(state.search_iterations, 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity classification produced by the decide stage.
///
/// This is a total classification: every inference response maps to one of
/// the three variants, with anything unrecognized coerced to [`Both`].
///
/// [`Both`]: ActivityPreference::Both
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityPreference {
    /// Prioritize indoor venues (bad weather expected).
    Indoor,
    /// Prioritize outdoor venues.
    Outdoor,
    /// No weather-driven bias.
    #[default]
    Both,
}

impl ActivityPreference {
    /// Parse an inference response leniently.
    ///
    /// The response is trimmed and upper-cased before matching; any value
    /// outside the three-label set coerces to [`ActivityPreference::Both`].
    ///
    /// ```rust
    /// use tripsmith::state::ActivityPreference;
    ///
    /// assert_eq!(ActivityPreference::parse_lenient(" indoor\n"), ActivityPreference::Indoor);
    /// assert_eq!(ActivityPreference::parse_lenient("no idea"), ActivityPreference::Both);
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "INDOOR" => Self::Indoor,
            "OUTDOOR" => Self::Outdoor,
            _ => Self::Both,
        }
    }

    /// Search-category prefix applied to each interest.
    ///
    /// `Both` applies no modifier; the interest text is used verbatim.
    #[must_use]
    pub fn category_modifier(self) -> &'static str {
        match self {
            Self::Indoor => "indoor ",
            Self::Outdoor => "outdoor ",
            Self::Both => "",
        }
    }

    /// The canonical upper-case label for this preference.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "INDOOR",
            Self::Outdoor => "OUTDOOR",
            Self::Both => "BOTH",
        }
    }
}

impl fmt::Display for ActivityPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single mutable record threaded through every stage of a run.
///
/// Created at run start from the raw request, mutated only by the engine's
/// sequential merge step, and discarded when the run returns. Fields other
/// than `user_request` start at their zero values and are populated as the
/// pipeline advances; see the field docs for which stage owns each one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    /// The raw free-text travel request. Immutable after creation.
    pub user_request: String,
    /// Destination city; sentinel `"Unknown"` when extraction misses.
    pub city: String,
    /// Trip length in days, at least 1 once the parse stage has run.
    pub days: u32,
    /// Comma-separated interest list, e.g. `"museums, cafes"`.
    pub interests: String,
    /// Formatted forecast summary, or an embedded error message when the
    /// provider failed (the run continues degraded either way).
    pub weather_data: String,
    /// Weather-driven activity bias from the decide stage.
    pub activity_preference: ActivityPreference,
    /// One entry per interest, order matching the interests list. Entries may
    /// embed per-category error text in place of results.
    pub activities: Vec<String>,
    /// How many times the fan-out stage has run. Monotonically non-decreasing;
    /// the quality gate reads this to enforce the iteration ceiling.
    pub search_iterations: u32,
    /// The terminal artifact, set exactly once by the generate stage.
    pub final_itinerary: Option<String>,
}

impl PlannerState {
    /// Create the state record for a new run.
    pub fn new(user_request: impl Into<String>) -> Self {
        Self {
            user_request: user_request.into(),
            ..Default::default()
        }
    }

    /// Merge a stage's partial update into this record.
    ///
    /// Shallow, last-write-wins per field: each `Some` field overwrites the
    /// corresponding state field wholesale, `None` fields are left alone.
    pub fn apply(&mut self, partial: StagePartial) {
        if let Some(city) = partial.city {
            self.city = city;
        }
        if let Some(days) = partial.days {
            self.days = days;
        }
        if let Some(interests) = partial.interests {
            self.interests = interests;
        }
        if let Some(weather_data) = partial.weather_data {
            self.weather_data = weather_data;
        }
        if let Some(preference) = partial.activity_preference {
            self.activity_preference = preference;
        }
        if let Some(activities) = partial.activities {
            self.activities = activities;
        }
        if let Some(iterations) = partial.search_iterations {
            self.search_iterations = iterations;
        }
        if let Some(itinerary) = partial.final_itinerary {
            self.final_itinerary = Some(itinerary);
        }
    }
}

/// Partial state update returned by a stage.
///
/// Every settable [`PlannerState`] field appears here as an `Option`, so a
/// stage names only the fields it actually produced. The engine applies the
/// partial with [`PlannerState::apply`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StagePartial {
    pub city: Option<String>,
    pub days: Option<u32>,
    pub interests: Option<String>,
    pub weather_data: Option<String>,
    pub activity_preference: Option<ActivityPreference>,
    pub activities: Option<Vec<String>>,
    pub search_iterations: Option<u32>,
    pub final_itinerary: Option<String>,
}

impl StagePartial {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    #[must_use]
    pub fn with_interests(mut self, interests: impl Into<String>) -> Self {
        self.interests = Some(interests.into());
        self
    }

    #[must_use]
    pub fn with_weather_data(mut self, weather_data: impl Into<String>) -> Self {
        self.weather_data = Some(weather_data.into());
        self
    }

    #[must_use]
    pub fn with_activity_preference(mut self, preference: ActivityPreference) -> Self {
        self.activity_preference = Some(preference);
        self
    }

    #[must_use]
    pub fn with_activities(mut self, activities: Vec<String>) -> Self {
        self.activities = Some(activities);
        self
    }

    #[must_use]
    pub fn with_search_iterations(mut self, iterations: u32) -> Self {
        self.search_iterations = Some(iterations);
        self
    }

    #[must_use]
    pub fn with_final_itinerary(mut self, itinerary: impl Into<String>) -> Self {
        self.final_itinerary = Some(itinerary.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_only_named_fields() {
        let mut state = PlannerState::new("req");
        state.apply(StagePartial::new().with_city("Athens").with_days(5));
        state.apply(StagePartial::new().with_weather_data("Day 1: Clear, 25.5°C"));

        assert_eq!(state.city, "Athens");
        assert_eq!(state.days, 5);
        assert_eq!(state.weather_data, "Day 1: Clear, 25.5°C");
        assert_eq!(state.user_request, "req");
    }

    #[test]
    fn apply_replaces_activities_wholesale() {
        let mut state = PlannerState::new("req");
        state.apply(
            StagePartial::new()
                .with_activities(vec!["Museums: a".into(), "Cafes: b".into()])
                .with_search_iterations(1),
        );
        state.apply(
            StagePartial::new()
                .with_activities(vec!["Museums: c".into(), "Cafes: d".into()])
                .with_search_iterations(2),
        );

        assert_eq!(state.activities, vec!["Museums: c", "Cafes: d"]);
        assert_eq!(state.search_iterations, 2);
    }

    #[test]
    fn preference_parsing_is_total() {
        assert_eq!(
            ActivityPreference::parse_lenient("OUTDOOR"),
            ActivityPreference::Outdoor
        );
        assert_eq!(
            ActivityPreference::parse_lenient("  both "),
            ActivityPreference::Both
        );
        assert_eq!(
            ActivityPreference::parse_lenient("INSIDE, MOSTLY"),
            ActivityPreference::Both
        );
        assert_eq!(
            ActivityPreference::parse_lenient(""),
            ActivityPreference::Both
        );
    }

    #[test]
    fn modifier_matches_preference() {
        assert_eq!(ActivityPreference::Indoor.category_modifier(), "indoor ");
        assert_eq!(ActivityPreference::Outdoor.category_modifier(), "outdoor ");
        assert_eq!(ActivityPreference::Both.category_modifier(), "");
    }
}
