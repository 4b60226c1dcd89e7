//! Behavioural tests for `SqliteGraphStore` using rstest-bdd.
#![cfg(feature = "store-sqlite")]

use std::cell::RefCell;

use bonvoyage_core::{
    GraphSnapshot, Location, PlanError, RoutePlanner, RouteQuery, RouteRecord, SqliteGraphStore,
    SqliteGraphStoreError, persist_graph,
};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use rusqlite::Connection;
use tempfile::TempDir;

/// Temporary database and outcomes shared by the store scenarios.
#[derive(Debug)]
struct StoreWorld {
    temp_dir: TempDir,
    store: RefCell<Option<SqliteGraphStore>>,
    open_error: RefCell<Option<SqliteGraphStoreError>>,
    outcome: RefCell<Option<Result<Vec<String>, PlanError>>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
            store: RefCell::new(None),
            open_error: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn db_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.temp_dir.path().join("graph.db")).expect("utf-8 path")
    }
}

#[fixture]
fn world() -> StoreWorld {
    StoreWorld::new()
}

fn snapshot() -> GraphSnapshot {
    let route = |source: &str, destination: &str| RouteRecord {
        source: source.to_owned(),
        destination: destination.to_owned(),
        travel_time: 45,
        travel_cost: 150,
    };
    GraphSnapshot {
        locations: vec![
            Location::new(1, "Bandarban", "Bandarban"),
            Location::new(2, "Nilgiri", "Bandarban")
                .with_rating(4.7)
                .with_category("hill"),
            Location::new(3, "Boga Lake", "Bandarban")
                .with_rating(4.3)
                .with_category("lake"),
        ],
        routes: vec![
            route("Bandarban", "Boga Lake"),
            route("Bandarban", "Nilgiri"),
        ],
        ratings: Vec::new(),
    }
}

#[given("a persisted graph with a hub and two attractions")]
fn given_graph(world: &StoreWorld) {
    persist_graph(&world.db_path(), &snapshot()).expect("persist graph");
}

#[given("an empty SQLite database")]
fn given_empty_database(world: &StoreWorld) {
    Connection::open(world.db_path().as_std_path())
        .and_then(|connection| connection.execute_batch("CREATE TABLE notes (body TEXT)"))
        .expect("create unrelated database");
}

#[given("a persisted graph whose categories column is corrupted")]
fn given_corrupted_graph(world: &StoreWorld) {
    let path = world.db_path();
    persist_graph(&path, &snapshot()).expect("persist graph");
    let connection = Connection::open(path.as_std_path()).expect("reopen database");
    connection
        .execute(
            "UPDATE locations SET categories = '{broken' WHERE name = 'Nilgiri'",
            [],
        )
        .expect("corrupt categories");
}

#[when("I open the SQLite graph store")]
fn open_store(world: &StoreWorld) {
    match SqliteGraphStore::open(world.db_path().as_std_path()) {
        Ok(store) => {
            world.store.replace(Some(store));
        }
        Err(err) => {
            world.open_error.replace(Some(err));
        }
    }
}

#[when("I plan a route from the hub")]
fn plan_from_hub(world: &StoreWorld) {
    let store = world
        .store
        .borrow_mut()
        .take()
        .expect("store should be open");
    let outcome = RoutePlanner::new(store)
        .plan(&RouteQuery::new("Bandarban", "Bandarban"))
        .map(|itinerary| {
            itinerary
                .into_stops()
                .into_iter()
                .map(|stop| stop.name)
                .collect()
        });
    world.outcome.replace(Some(outcome));
}

#[then("the route visits both attractions by rating")]
fn then_route(world: &StoreWorld) {
    let outcome = world.outcome.borrow();
    let names = outcome
        .as_ref()
        .expect("a plan should have run")
        .as_ref()
        .expect("planning should succeed");
    assert_eq!(names, &["Bandarban", "Nilgiri", "Boga Lake"]);
}

#[then("opening fails with a missing table error")]
fn then_missing_table(world: &StoreWorld) {
    let error = world.open_error.borrow();
    assert!(matches!(
        error.as_ref(),
        Some(SqliteGraphStoreError::MissingTable { .. })
    ));
}

#[then("planning fails with a store error")]
fn then_store_error(world: &StoreWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(PlanError::Store(_)))
    ));
}

#[scenario(path = "tests/features/sqlite_graph_store.feature", index = 0)]
fn plans_from_persisted_graph(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_graph_store.feature", index = 1)]
fn missing_tables(world: StoreWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/sqlite_graph_store.feature", index = 2)]
fn corrupted_categories(world: StoreWorld) {
    let _ = world;
}
