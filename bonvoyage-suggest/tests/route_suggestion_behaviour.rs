//! Behavioural coverage for route suggestions over a stored graph.

use std::cell::RefCell;

use bonvoyage_core::{GraphSnapshot, Location, RouteRecord, SqliteGraphStore, persist_graph};
use bonvoyage_suggest::{
    MediaConfig, RouteSuggester, SuggestError, SuggestRequest, SuggestResponse,
};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// Shared state for suggestion scenarios.
pub struct SuggestionContext {
    temp_dir: TempDir,
    request: RefCell<SuggestRequest>,
    outcome: RefCell<Option<Result<SuggestResponse, SuggestError>>>,
}

impl SuggestionContext {
    fn db_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.temp_dir.path().join("bonvoyage.db"))
            .expect("temporary paths are UTF-8")
    }

    fn route_names(&self) -> Vec<String> {
        let outcome = self.outcome.borrow();
        let response = outcome
            .as_ref()
            .expect("a suggestion should have been requested")
            .as_ref()
            .expect("the suggestion should succeed");
        response.names().map(str::to_owned).collect()
    }
}

/// Build a fresh context for each scenario.
#[fixture]
pub fn context() -> SuggestionContext {
    SuggestionContext {
        temp_dir: TempDir::new().expect("create tempdir for scenario"),
        request: RefCell::new(SuggestRequest::default()),
        outcome: RefCell::new(None),
    }
}

#[given("a stored graph around Sylhet")]
fn given_graph(context: &SuggestionContext) {
    let route = |source: &str, destination: &str, travel_cost: u32| RouteRecord {
        source: source.to_owned(),
        destination: destination.to_owned(),
        travel_time: 60,
        travel_cost,
    };
    let snapshot = GraphSnapshot {
        locations: vec![
            Location::new(1, "Sylhet", "Sylhet"),
            Location::new(2, "Ratargul", "Sylhet")
                .with_rating(4.5)
                .with_category("forest"),
            Location::new(3, "Lalakhal", "Sylhet")
                .with_rating(4.8)
                .with_category("river"),
        ],
        routes: vec![
            route("Sylhet", "Ratargul", 200),
            route("Sylhet", "Lalakhal", 400),
        ],
        ratings: Vec::new(),
    };
    persist_graph(&context.db_path(), &snapshot).expect("persist graph");
}

#[given("a request from Sylhet into Sylhet with a budget of 10000 over three days")]
fn given_valid_request(context: &SuggestionContext) {
    context.request.replace(
        SuggestRequest::new("Sylhet", "Sylhet")
            .with_budget(10_000.0)
            .with_dates("2025-07-08", "2025-07-10"),
    );
}

#[given("a request from a nonexistent location")]
fn given_unknown_source(context: &SuggestionContext) {
    context
        .request
        .replace(SuggestRequest::new("Nonexistent", "Sylhet").with_budget(10_000.0));
}

#[given("a request whose end date precedes its start date")]
fn given_reversed_dates(context: &SuggestionContext) {
    context.request.replace(
        SuggestRequest::new("Sylhet", "Sylhet").with_dates("2025-07-10", "2025-07-08"),
    );
}

#[given("a request with a non-numeric budget")]
fn given_non_numeric_budget(context: &SuggestionContext) {
    context
        .request
        .replace(SuggestRequest::new("Sylhet", "Sylhet").with_budget("plenty"));
}

#[given("a request from Sylhet into Sylhet with a budget of 1600 shared by two")]
fn given_tiered_request(context: &SuggestionContext) {
    context.request.replace(
        SuggestRequest::new("Sylhet", "Sylhet")
            .with_budget("1600")
            .with_tier(2.0),
    );
}

#[when("I ask for a suggestion")]
fn ask(context: &SuggestionContext) {
    let store = SqliteGraphStore::open(context.db_path().as_std_path()).expect("open store");
    let media = MediaConfig::parse("http://localhost:8000/media/").expect("valid media URL");
    let suggester = RouteSuggester::new(store, media);
    let outcome = suggester.suggest(&context.request.borrow(), None);
    context.outcome.replace(Some(outcome));
}

#[then("the suggested route is Sylhet, Lalakhal, Ratargul")]
fn then_full_route(context: &SuggestionContext) {
    assert_eq!(context.route_names(), ["Sylhet", "Lalakhal", "Ratargul"]);
}

#[then("the suggested route is Sylhet, Ratargul")]
fn then_cheap_route(context: &SuggestionContext) {
    assert_eq!(context.route_names(), ["Sylhet", "Ratargul"]);
}

#[then("the suggested route is empty")]
fn then_empty(context: &SuggestionContext) {
    assert!(context.route_names().is_empty());
}

fn assert_rejected(context: &SuggestionContext, message: &str) {
    let outcome = context.outcome.borrow();
    let err = outcome
        .as_ref()
        .expect("a suggestion should have been requested")
        .as_ref()
        .expect_err("the request should be rejected");
    assert_eq!(err.status(), 400);
    assert_eq!(err.to_string(), message);
}

#[then("the request is rejected for its dates")]
fn then_rejected_dates(context: &SuggestionContext) {
    assert_rejected(context, "End date must be after start date.");
}

#[then("the request is rejected for its budget")]
fn then_rejected_budget(context: &SuggestionContext) {
    assert_rejected(context, "Budget and tier must be numbers.");
}

#[scenario(path = "tests/features/route_suggestion.feature", index = 0)]
fn valid_request(context: SuggestionContext) {
    let _ = context;
}

#[scenario(path = "tests/features/route_suggestion.feature", index = 1)]
fn unknown_source(context: SuggestionContext) {
    let _ = context;
}

#[scenario(path = "tests/features/route_suggestion.feature", index = 2)]
fn reversed_dates(context: SuggestionContext) {
    let _ = context;
}

#[scenario(path = "tests/features/route_suggestion.feature", index = 3)]
fn non_numeric_budget(context: SuggestionContext) {
    let _ = context;
}

#[scenario(path = "tests/features/route_suggestion.feature", index = 4)]
fn tiered_budget(context: SuggestionContext) {
    let _ = context;
}
