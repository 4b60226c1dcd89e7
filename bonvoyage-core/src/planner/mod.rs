//! Greedy multi-day route construction.
//!
//! The planner grows a route outwards from the source, one committed move at
//! a time. Each round it ranks every edge leaving the visited set by the depth
//! of its departure (deepest first, so the route keeps extending its newest
//! branch) and then by the arrival's rating, and commits the first move that
//! fits the day limit and the budget. Committed moves are never undone; when
//! no move fits, the route is complete.

use log::{debug, warn};
use thiserror::Error;

use crate::{Edge, GraphStore, GraphStoreError, Itinerary, Location, PlannerConfig, retain_category};

mod state;

use state::PlanningState;

/// Parameters for a single route request.
///
/// # Examples
/// ```rust
/// use bonvoyage_core::RouteQuery;
///
/// let query = RouteQuery::new("Lalbagh Fort", "Cox's Bazar")
///     .with_budget(15_000.0)
///     .with_day_limit(3)
///     .with_category("beach");
/// assert_eq!(query.day_limit, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    /// Name of the starting location.
    pub source: String,
    /// District the route should head into.
    pub destination_district: String,
    /// Total budget; `None` disables cost tracking.
    pub budget: Option<f64>,
    /// Maximum number of trip days; `None` disables the limit.
    pub day_limit: Option<u32>,
    /// Category kept by the post-filter; `None` keeps every stop.
    pub category: Option<String>,
}

impl RouteQuery {
    /// Unconstrained query from `source` into `destination_district`.
    pub fn new(source: impl Into<String>, destination_district: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination_district: destination_district.into(),
            budget: None,
            day_limit: None,
            category: None,
        }
    }

    /// Limit the total spend.
    #[must_use]
    pub const fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Limit the number of days.
    #[must_use]
    pub const fn with_day_limit(mut self, days: u32) -> Self {
        self.day_limit = Some(days);
        self
    }

    /// Keep only stops tagged with `category`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Errors returned while planning.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The budget was not a number.
    #[error("budget must be a number")]
    InvalidBudget,
    /// The graph store failed or returned malformed data.
    #[error("failed to read the location graph")]
    Store(#[from] GraphStoreError),
}

/// Route planner bound to a graph store and a configuration.
///
/// The planner holds no per-request state, so one instance can serve
/// concurrent requests whenever the store allows shared access.
#[derive(Debug, Clone)]
pub struct RoutePlanner<S> {
    store: S,
    config: PlannerConfig,
}

impl<S> RoutePlanner<S>
where
    S: GraphStore,
{
    /// Planner using [`PlannerConfig::default`].
    pub fn new(store: S) -> Self {
        Self::with_config(store, PlannerConfig::default())
    }

    /// Planner with explicit limits.
    pub const fn with_config(store: S, config: PlannerConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Build an itinerary for `query`.
    ///
    /// # Errors
    /// Returns [`PlanError::InvalidBudget`] for a NaN budget and
    /// [`PlanError::Store`] when the store fails. An unknown source is not an
    /// error; it yields an empty itinerary.
    pub fn plan(&self, query: &RouteQuery) -> Result<Itinerary, PlanError> {
        build_route(&self.store, &self.config, query)
    }
}

/// Build an itinerary for `query` from the graph in `store`.
///
/// The store is read twice: once to resolve the source and once for the
/// edges into the destination district. Everything after that runs on the
/// fetched snapshot.
///
/// # Errors
/// See [`RoutePlanner::plan`].
pub fn build_route<S>(
    store: &S,
    config: &PlannerConfig,
    query: &RouteQuery,
) -> Result<Itinerary, PlanError>
where
    S: GraphStore + ?Sized,
{
    let budget = match query.budget {
        Some(budget) if budget.is_nan() => return Err(PlanError::InvalidBudget),
        Some(budget) if budget.is_finite() => Some(budget),
        _ => None,
    };

    let Some(source) = store.location_by_name(&query.source)? else {
        warn!("route source {} does not exist", query.source);
        return Ok(Itinerary::empty());
    };
    let edges = store.edges_into_district(&query.destination_district)?;

    let mut state = PlanningState::start(&source, budget);
    if state.charge_first_day(config.daily_food_cost) {
        extend_route(&mut state, &edges, config, query.day_limit);
    } else {
        debug!(
            "budget {budget:?} does not cover the first day's food; route stops at {}",
            source.name
        );
    }

    let path: Vec<Location> = state.path().cloned().collect();
    let summary = state.summary();
    let stops = retain_category(
        path.clone(),
        &source.name,
        &query.destination_district,
        query.category.as_deref(),
    );
    debug!(
        "planned {} stops ({} before filtering) over {} days from {} into {}",
        stops.len(),
        path.len(),
        summary.days,
        source.name,
        query.destination_district
    );
    Ok(Itinerary::new(stops, path, summary))
}

/// Commit moves until none fits.
fn extend_route<'a>(
    state: &mut PlanningState<'a>,
    edges: &'a [Edge],
    config: &PlannerConfig,
    day_limit: Option<u32>,
) {
    loop {
        let mut frontier: Vec<&Edge> = edges.iter().filter(|edge| state.is_frontier(edge)).collect();
        // Stable sort: exact ties keep the store's order.
        frontier.sort_by(|a, b| state.priority(a, b));

        let next = frontier
            .into_iter()
            .find_map(|edge| state.evaluate(edge, config, day_limit).map(|step| (edge, step)));
        let Some((edge, step)) = next else {
            return;
        };
        debug!(
            "day {}: {} -> {} ({} min, cost {})",
            step.day, edge.source.name, edge.destination.name, edge.travel_time, step.cost
        );
        state.commit(edge, step);
    }
}
