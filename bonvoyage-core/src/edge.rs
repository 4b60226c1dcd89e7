//! Directed, timed and costed connections between locations.

use thiserror::Error;

use crate::Location;

/// A one-way connection from `source` to `destination`.
///
/// Both endpoints are carried in full so the planner can rank moves by the
/// destination's rating without further store lookups. Stores hold at most
/// one edge per ordered pair; the reverse direction is a separate edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Departure location.
    pub source: Location,
    /// Arrival location.
    pub destination: Location,
    /// Travel time in minutes. Always positive.
    pub travel_time: u32,
    /// Travel cost in currency units.
    pub travel_cost: u32,
}

/// Errors returned by [`Edge::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeError {
    /// The travel time was zero.
    #[error("route {source_name} -> {destination} must take at least one minute")]
    ZeroTravelTime {
        /// Name of the departure location.
        source_name: String,
        /// Name of the arrival location.
        destination: String,
    },
}

impl Edge {
    /// Validate and construct an edge.
    ///
    /// # Errors
    /// Returns [`EdgeError::ZeroTravelTime`] when `travel_time` is zero.
    ///
    /// # Examples
    /// ```
    /// use bonvoyage_core::{Edge, Location};
    ///
    /// let a = Location::new(1, "Srimangal", "Moulvibazar");
    /// let b = Location::new(2, "Lawachara", "Moulvibazar");
    /// let edge = Edge::new(a, b, 45, 150).expect("positive travel time");
    /// assert_eq!(edge.travel_time, 45);
    /// ```
    pub fn new(
        source: Location,
        destination: Location,
        travel_time: u32,
        travel_cost: u32,
    ) -> Result<Self, EdgeError> {
        if travel_time == 0 {
            return Err(EdgeError::ZeroTravelTime {
                source_name: source.name,
                destination: destination.name,
            });
        }
        Ok(Self {
            source,
            destination,
            travel_time,
            travel_cost,
        })
    }
}
