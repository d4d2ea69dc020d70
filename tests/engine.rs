mod common;

use std::sync::Arc;

use common::{RecordingSearch, ScriptedInference, StaticWeather};
use tripsmith::config::PlannerConfig;
use tripsmith::engine::{Planner, PlannerError};
use tripsmith::gate::{QualityGate, Route};
use tripsmith::state::PlannerState;

const FORECAST: &str = "Day 1: Clear, 25.5°C | Day 2: Rain, 18.2°C";

fn planner_with(
    llm: Arc<ScriptedInference>,
    search: Arc<RecordingSearch>,
    ceiling: u32,
) -> Planner {
    Planner::new(
        llm,
        Arc::new(StaticWeather(FORECAST)),
        search,
        PlannerConfig::new(ceiling),
    )
}

#[tokio::test]
async fn gate_advances_at_ceiling_without_inference() {
    let llm = Arc::new(ScriptedInference::new(["NEED_MORE"]));
    let gate = QualityGate::new(llm.clone(), 2);

    let mut state = PlannerState::new("req");
    state.search_iterations = 2;
    assert_eq!(gate.evaluate(&state).await.unwrap(), Route::Advance);

    // Past the ceiling as well, still no judgment call.
    state.search_iterations = 7;
    assert_eq!(gate.evaluate(&state).await.unwrap(), Route::Advance);
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn gate_loops_only_on_need_more() {
    let llm = Arc::new(ScriptedInference::new([
        "NEED_MORE",
        "sufficient",
        "cannot tell, sorry",
    ]));
    let gate = QualityGate::new(llm, 5);
    let mut state = PlannerState::new("req");
    state.search_iterations = 1;
    state.activities = vec!["Museums: generic descriptions".to_string()];

    assert_eq!(gate.evaluate(&state).await.unwrap(), Route::RefineSearch);
    assert_eq!(gate.evaluate(&state).await.unwrap(), Route::Advance);
    // Unparseable output is the fail-safe path: advance, never loop.
    assert_eq!(gate.evaluate(&state).await.unwrap(), Route::Advance);
}

#[tokio::test]
async fn refinement_loop_runs_fanout_twice_then_generates() {
    // Ceiling 3 so the second verdict is a real judgment, not the forced one.
    let llm = Arc::new(ScriptedInference::new([
        "City: Kyoto\nDays: 2\nInterests: temples, food",
        "OUTDOOR",
        "NEED_MORE",
        "SUFFICIENT",
        "# 2-Day Itinerary for Kyoto\n...",
    ]));
    let search = Arc::new(RecordingSearch::new());
    let planner = planner_with(llm.clone(), search.clone(), 3);

    let state = planner.run("two days in Kyoto").await.unwrap();

    assert_eq!(state.search_iterations, 2);
    assert_eq!(state.activities.len(), 2);
    assert_eq!(
        state.final_itinerary.as_deref(),
        Some("# 2-Day Itinerary for Kyoto\n...")
    );

    // Both passes fan out once per interest, with the then-current
    // preference's modifier applied each time.
    let queries = search.queries();
    assert_eq!(queries.len(), 4);
    assert!(
        queries
            .iter()
            .all(|(city, category)| city == "Kyoto" && category.starts_with("outdoor ")),
        "{queries:?}"
    );
    // parse + decide + two gate judgments + generate
    assert_eq!(llm.call_count(), 5);
}

#[tokio::test]
async fn ceiling_forces_advance_after_second_pass() {
    // Ceiling 2: the first gate check loops, the second is forced with no
    // inference call, so only one NEED_MORE is scripted.
    let llm = Arc::new(ScriptedInference::new([
        "City: Athens\nDays: 3\nInterests: ruins, food",
        "BOTH",
        "NEED_MORE",
        "# 3-Day Itinerary for Athens\n...",
    ]));
    let search = Arc::new(RecordingSearch::new());
    let planner = planner_with(llm.clone(), search.clone(), 2);

    let state = planner.run("three days in Athens").await.unwrap();

    assert_eq!(state.search_iterations, 2);
    assert!(state.final_itinerary.is_some());
    assert_eq!(search.queries().len(), 4);
    assert_eq!(llm.call_count(), 4);
}

#[tokio::test]
async fn plan_trip_returns_the_generated_text() {
    let llm = Arc::new(ScriptedInference::new([
        "City: Lisbon\nDays: 1\nInterests: food",
        "BOTH",
        "SUFFICIENT",
        "# 1-Day Itinerary for Lisbon",
    ]));
    let planner = planner_with(llm, Arc::new(RecordingSearch::new()), 2);

    let itinerary = planner.plan_trip("a day in Lisbon").await.unwrap();
    assert_eq!(itinerary, "# 1-Day Itinerary for Lisbon");
}

#[tokio::test]
async fn inference_fault_aborts_the_run() {
    // Empty script: the very first inference call fails.
    let llm = Arc::new(ScriptedInference::new(Vec::<String>::new()));
    let planner = planner_with(llm, Arc::new(RecordingSearch::new()), 2);

    let err = planner.plan_trip("anywhere").await.unwrap_err();
    assert!(matches!(err, PlannerError::Stage { .. }));
}

#[tokio::test]
async fn non_numeric_days_aborts_the_run() {
    let llm = Arc::new(ScriptedInference::new([
        "City: Oslo\nDays: several\nInterests: art",
    ]));
    let planner = planner_with(llm, Arc::new(RecordingSearch::new()), 2);

    let err = planner.plan_trip("a while in Oslo").await.unwrap_err();
    assert!(matches!(err, PlannerError::Stage { .. }), "{err:?}");
}

#[tokio::test]
async fn degraded_weather_still_produces_an_itinerary() {
    let llm = Arc::new(ScriptedInference::new([
        "City: Bergen\nDays: 2\nInterests: hiking",
        "INDOOR",
        "SUFFICIENT",
        "# 2-Day Itinerary for Bergen",
    ]));
    let planner = Planner::new(
        llm,
        Arc::new(common::FailingWeather),
        Arc::new(RecordingSearch::new()),
        PlannerConfig::new(2),
    );

    let state = planner.run("two rainy days in Bergen").await.unwrap();
    assert!(state.weather_data.starts_with("Error fetching weather:"));
    assert!(state.final_itinerary.is_some());
}
