//! Transient bookkeeping owned by a single planning call.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{Edge, Location, PlannerConfig, TripSummary};

/// The outcome of tentatively applying an edge to the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Move {
    pub(super) day: u32,
    pub(super) minutes_today: u32,
    pub(super) cost: f64,
}

/// Day, budget and visit tracking for one plan.
///
/// `depth` doubles as the visited set: a location is visited exactly when it
/// has a depth. `path` lists visited locations in commit order.
#[derive(Debug)]
pub(super) struct PlanningState<'a> {
    day: u32,
    minutes_today: u32,
    remaining: Option<f64>,
    spent: f64,
    depth: HashMap<&'a str, usize>,
    path: Vec<&'a Location>,
}

impl<'a> PlanningState<'a> {
    /// Start at `source` on day one with the full budget.
    pub(super) fn start(source: &'a Location, budget: Option<f64>) -> Self {
        Self {
            day: 1,
            minutes_today: 0,
            remaining: budget,
            spent: 0.0,
            depth: HashMap::from([(source.name.as_str(), 0)]),
            path: vec![source],
        }
    }

    /// Charge day one's food up front.
    ///
    /// Returns `false`, leaving the state untouched, when the charge would
    /// take the budget below zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "budgets become fractional once divided across travellers"
    )]
    pub(super) fn charge_first_day(&mut self, food_cost: u32) -> bool {
        let Some(remaining) = self.remaining else {
            return true;
        };
        let cost = f64::from(food_cost);
        if remaining - cost < 0.0 {
            return false;
        }
        self.remaining = Some(remaining - cost);
        self.spent += cost;
        true
    }

    pub(super) fn is_visited(&self, name: &str) -> bool {
        self.depth.contains_key(name)
    }

    pub(super) fn depth_of(&self, name: &str) -> usize {
        self.depth.get(name).copied().unwrap_or_default()
    }

    /// Whether `edge` leaves the visited set for an unvisited location.
    pub(super) fn is_frontier(&self, edge: &Edge) -> bool {
        self.is_visited(&edge.source.name) && !self.is_visited(&edge.destination.name)
    }

    /// Priority order between two frontier edges: deeper departure first,
    /// then better-rated arrival.
    pub(super) fn priority(&self, a: &Edge, b: &Edge) -> Ordering {
        self.depth_of(&b.source.name)
            .cmp(&self.depth_of(&a.source.name))
            .then_with(|| b.destination.rating.total_cmp(&a.destination.rating))
    }

    /// Evaluate `edge` without mutating anything.
    ///
    /// Returns `None` when the move would break the day limit or the budget.
    #[expect(
        clippy::float_arithmetic,
        reason = "rollover costs join a fractional budget"
    )]
    pub(super) fn evaluate(
        &self,
        edge: &Edge,
        config: &PlannerConfig,
        day_limit: Option<u32>,
    ) -> Option<Move> {
        let travelled = self.minutes_today.saturating_add(edge.travel_time);
        let mut cost = f64::from(edge.travel_cost);
        let (day, minutes_today) = if travelled > config.daily_travel_cap_minutes {
            if self.remaining.is_some() {
                cost += config.day_rollover_cost();
            }
            (self.day.saturating_add(1), edge.travel_time)
        } else {
            (self.day, travelled)
        };

        if day_limit.is_some_and(|limit| day > limit) {
            return None;
        }
        if self.remaining.is_some_and(|remaining| remaining < cost) {
            return None;
        }
        Some(Move {
            day,
            minutes_today,
            cost,
        })
    }

    /// Apply a move produced by [`PlanningState::evaluate`] for `edge`.
    #[expect(
        clippy::float_arithmetic,
        reason = "budgets become fractional once divided across travellers"
    )]
    pub(super) fn commit(&mut self, edge: &'a Edge, step: Move) {
        let depth = self.depth_of(&edge.source.name) + 1;
        self.day = step.day;
        self.minutes_today = step.minutes_today;
        self.remaining = self.remaining.map(|remaining| remaining - step.cost);
        self.spent += step.cost;
        self.depth.insert(edge.destination.name.as_str(), depth);
        self.path.push(&edge.destination);
    }

    pub(super) fn path(&self) -> impl Iterator<Item = &'a Location> + '_ {
        self.path.iter().copied()
    }

    pub(super) const fn summary(&self) -> TripSummary {
        TripSummary {
            days: self.day,
            minutes_last_day: self.minutes_today,
            spent: self.spent,
            remaining_budget: self.remaining,
        }
    }
}
