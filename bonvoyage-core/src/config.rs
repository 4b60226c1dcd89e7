//! Tunable constants for the route planner.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default cap on travel minutes per day (nine hours).
pub const DEFAULT_DAILY_TRAVEL_CAP_MINUTES: u32 = 540;

/// Default food cost charged for every day of the trip.
pub const DEFAULT_DAILY_FOOD_COST: u32 = 500;

/// Default accommodation cost charged for every night before a new day.
pub const DEFAULT_NIGHTLY_ACCOMMODATION_COST: u32 = 1_500;

/// Travel and cost limits applied while building a route.
///
/// Food and accommodation costs only apply when the query carries a budget.
///
/// # Examples
/// ```
/// use bonvoyage_core::PlannerConfig;
///
/// let config = PlannerConfig {
///     daily_travel_cap_minutes: 360,
///     ..PlannerConfig::default()
/// };
/// assert_eq!(config.daily_food_cost, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Travel minutes allowed on a single day before a move rolls over.
    pub daily_travel_cap_minutes: u32,
    /// Food cost per day, charged up front for day one.
    pub daily_food_cost: u32,
    /// Accommodation cost added whenever a move starts a new day.
    pub nightly_accommodation_cost: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_travel_cap_minutes: DEFAULT_DAILY_TRAVEL_CAP_MINUTES,
            daily_food_cost: DEFAULT_DAILY_FOOD_COST,
            nightly_accommodation_cost: DEFAULT_NIGHTLY_ACCOMMODATION_COST,
        }
    }
}

impl PlannerConfig {
    /// Cost of rolling over into a new day: one night plus that day's food.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "costs are summed in the planner's floating-point budget domain"
    )]
    pub fn day_rollover_cost(&self) -> f64 {
        f64::from(self.nightly_accommodation_cost) + f64::from(self.daily_food_cost)
    }
}
