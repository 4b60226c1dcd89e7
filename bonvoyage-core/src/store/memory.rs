//! In-memory graph store.
//!
//! Lookups are linear scans, which keeps fixtures simple and is fine for the
//! small graphs used in tests, benchmarks and examples.

use std::collections::HashMap;

use super::{GraphStore, GraphStoreError, LocationCatalogue};
use crate::{Edge, Location};

/// In-memory [`GraphStore`] and [`LocationCatalogue`].
///
/// Edges keep their insertion order, which is the order the planner falls
/// back to for exact priority ties.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraph {
    locations: Vec<Location>,
    edges: Vec<Edge>,
    ratings: HashMap<(String, u64), f64>,
}

impl MemoryGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Add several locations.
    #[must_use]
    pub fn with_locations<I>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = Location>,
    {
        self.locations.extend(locations);
        self
    }

    /// Add an edge.
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add several edges.
    #[must_use]
    pub fn with_edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        self.edges.extend(edges);
        self
    }

    /// Record the rating `username` gave a location.
    #[must_use]
    pub fn with_user_rating(
        mut self,
        username: impl Into<String>,
        location_id: u64,
        value: f64,
    ) -> Self {
        self.ratings.insert((username.into(), location_id), value);
        self
    }

    /// Stored edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl GraphStore for MemoryGraph {
    fn location_by_name(&self, name: &str) -> Result<Option<Location>, GraphStoreError> {
        Ok(self
            .locations
            .iter()
            .find(|location| location.name == name)
            .cloned())
    }

    fn edges_into_district(&self, district: &str) -> Result<Vec<Edge>, GraphStoreError> {
        Ok(self
            .edges
            .iter()
            .filter(|edge| edge.destination.district == district)
            .cloned()
            .collect())
    }
}

impl LocationCatalogue for MemoryGraph {
    fn location_by_id(&self, id: u64) -> Result<Option<Location>, GraphStoreError> {
        Ok(self
            .locations
            .iter()
            .find(|location| location.id == id)
            .cloned())
    }

    fn all_locations(&self) -> Result<Vec<Location>, GraphStoreError> {
        let mut locations = self.locations.clone();
        locations.sort_by_key(|location| location.id);
        Ok(locations)
    }

    fn user_rating(
        &self,
        username: &str,
        location_id: u64,
    ) -> Result<Option<f64>, GraphStoreError> {
        Ok(self
            .ratings
            .get(&(username.to_owned(), location_id))
            .copied())
    }
}
