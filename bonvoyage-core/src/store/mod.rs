//! Read-only access to the location graph.
//!
//! [`GraphStore`] is the narrow interface the planner needs: resolve a
//! location by name and fetch, in one call, every edge that arrives in a
//! district. [`LocationCatalogue`] adds the lookups used to present
//! locations. [`MemoryGraph`] implements both in memory; the `store-sqlite`
//! feature adds a SQLite-backed store and a writer for it.

use thiserror::Error;

use crate::{Edge, Location};

mod memory;
#[cfg(feature = "store-sqlite")]
mod persist;
#[cfg(feature = "store-sqlite")]
mod schema;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::MemoryGraph;
#[cfg(feature = "store-sqlite")]
pub use persist::{GraphSnapshot, PersistGraphError, RatingRecord, RouteRecord, persist_graph};
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteGraphStore, SqliteGraphStoreError};

/// Errors surfaced by graph stores.
#[derive(Debug, Error)]
pub enum GraphStoreError {
    /// A location row could not be turned into a [`Location`].
    #[error("location {location} is malformed: {reason}")]
    MalformedLocation {
        /// Name or identifier of the offending row.
        location: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A route row could not be turned into an [`Edge`].
    #[error("route {source_name} -> {destination} is malformed: {reason}")]
    MalformedEdge {
        /// Name of the departure location.
        source_name: String,
        /// Name of the arrival location.
        destination: String,
        /// What was wrong with it.
        reason: String,
    },
    /// The backing store failed.
    #[error("graph store backend failed")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Read-only access to locations and the edges between them.
///
/// The planner calls [`GraphStore::edges_into_district`] exactly once per
/// plan, so implementations should answer it with a single bulk fetch.
///
/// # Examples
///
/// ```rust
/// use bonvoyage_core::{Edge, GraphStore, Location, MemoryGraph};
///
/// let hub = Location::new(1, "Bandarban", "Bandarban");
/// let peak = Location::new(2, "Nilgiri", "Bandarban").with_rating(4.9);
/// let graph = MemoryGraph::new()
///     .with_location(hub.clone())
///     .with_location(peak.clone())
///     .with_edge(Edge::new(hub, peak, 90, 400).expect("valid edge"));
///
/// let edges = graph.edges_into_district("Bandarban").expect("in-memory lookup");
/// assert_eq!(edges.len(), 1);
/// assert!(graph.location_by_name("Nilgiri").expect("lookup").is_some());
/// ```
pub trait GraphStore {
    /// Resolve a location by its unique name.
    ///
    /// # Errors
    /// Returns [`GraphStoreError`] when the backing store fails or the row is
    /// malformed. An unknown name is `Ok(None)`.
    fn location_by_name(&self, name: &str) -> Result<Option<Location>, GraphStoreError>;

    /// Return every edge whose destination lies in `district`, with both
    /// endpoints resolved, in the store's stable order.
    ///
    /// # Errors
    /// Returns [`GraphStoreError`] when the backing store fails or a row is
    /// malformed.
    fn edges_into_district(&self, district: &str) -> Result<Vec<Edge>, GraphStoreError>;
}

/// Lookups used when presenting locations to visitors.
pub trait LocationCatalogue {
    /// Resolve a location by identifier.
    ///
    /// # Errors
    /// Returns [`GraphStoreError`] when the backing store fails.
    fn location_by_id(&self, id: u64) -> Result<Option<Location>, GraphStoreError>;

    /// Every stored location, in identifier order.
    ///
    /// # Errors
    /// Returns [`GraphStoreError`] when the backing store fails.
    fn all_locations(&self) -> Result<Vec<Location>, GraphStoreError>;

    /// The rating `username` gave the location, if any.
    ///
    /// # Errors
    /// Returns [`GraphStoreError`] when the backing store fails.
    fn user_rating(&self, username: &str, location_id: u64)
    -> Result<Option<f64>, GraphStoreError>;
}

impl<S> GraphStore for &S
where
    S: GraphStore + ?Sized,
{
    fn location_by_name(&self, name: &str) -> Result<Option<Location>, GraphStoreError> {
        (**self).location_by_name(name)
    }

    fn edges_into_district(&self, district: &str) -> Result<Vec<Edge>, GraphStoreError> {
        (**self).edges_into_district(district)
    }
}

impl<S> LocationCatalogue for &S
where
    S: LocationCatalogue + ?Sized,
{
    fn location_by_id(&self, id: u64) -> Result<Option<Location>, GraphStoreError> {
        (**self).location_by_id(id)
    }

    fn all_locations(&self) -> Result<Vec<Location>, GraphStoreError> {
        (**self).all_locations()
    }

    fn user_rating(
        &self,
        username: &str,
        location_id: u64,
    ) -> Result<Option<f64>, GraphStoreError> {
        (**self).user_rating(username, location_id)
    }
}
