//! Planned itineraries returned by the route planner.

use crate::Location;

/// Day and budget bookkeeping at the point planning stopped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TripSummary {
    /// Day counter reached by the last committed move. Zero for an empty
    /// itinerary.
    pub days: u32,
    /// Travel minutes spent on the final day.
    pub minutes_last_day: u32,
    /// Total committed cost, including food and accommodation when a budget
    /// was tracked.
    pub spent: f64,
    /// Budget left over, when a budget was tracked.
    pub remaining_budget: Option<f64>,
}

/// An ordered sequence of stops starting at the requested source.
///
/// `stops` is what callers present. `path` keeps every committed stop before
/// the category filter, in commit order; each stop in it was entered by an
/// edge from an earlier stop.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    stops: Vec<Location>,
    path: Vec<Location>,
    summary: TripSummary,
}

impl Itinerary {
    /// Construct an itinerary from filtered stops, the unfiltered path and the
    /// planning summary.
    #[must_use]
    pub const fn new(stops: Vec<Location>, path: Vec<Location>, summary: TripSummary) -> Self {
        Self {
            stops,
            path,
            summary,
        }
    }

    /// An itinerary without stops, returned when the source is unknown.
    ///
    /// # Examples
    /// ```
    /// use bonvoyage_core::Itinerary;
    ///
    /// let itinerary = Itinerary::empty();
    /// assert!(itinerary.is_empty());
    /// assert_eq!(itinerary.summary().days, 0);
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stops to present, after category filtering.
    #[must_use]
    pub fn stops(&self) -> &[Location] {
        &self.stops
    }

    /// Every committed stop, before category filtering.
    #[must_use]
    pub fn path(&self) -> &[Location] {
        &self.path
    }

    /// Planning bookkeeping.
    #[must_use]
    pub const fn summary(&self) -> &TripSummary {
        &self.summary
    }

    /// Whether there are no stops at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of stops after filtering.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Consume the itinerary, keeping only the filtered stops.
    #[must_use]
    pub fn into_stops(self) -> Vec<Location> {
        self.stops
    }
}
