//! Core domain types and route planning for the Bon Voyage engine.
//!
//! The crate models a directed graph of tourist [`Location`]s joined by timed
//! and costed [`Edge`]s, exposes the read-only [`GraphStore`] boundary used to
//! fetch that graph, and implements the greedy multi-day [`RoutePlanner`].
//!
//! # Examples
//! ```
//! use bonvoyage_core::{Edge, Location, MemoryGraph, RoutePlanner, RouteQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fort = Location::new(1, "Lalbagh Fort", "Dhaka").with_rating(4.5);
//! let beach = Location::new(2, "Inani Beach", "Cox's Bazar").with_rating(4.8);
//! let graph = MemoryGraph::new()
//!     .with_location(fort.clone())
//!     .with_location(beach.clone())
//!     .with_edge(Edge::new(fort, beach, 480, 1_200)?);
//!
//! let planner = RoutePlanner::new(graph);
//! let itinerary = planner.plan(&RouteQuery::new("Lalbagh Fort", "Cox's Bazar"))?;
//! let names: Vec<_> = itinerary.stops().iter().map(|stop| stop.name.as_str()).collect();
//! assert_eq!(names, ["Lalbagh Fort", "Inani Beach"]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod category;
pub mod config;
pub mod edge;
pub mod itinerary;
pub mod location;
pub mod planner;
pub mod store;

pub use category::retain_category;
pub use config::PlannerConfig;
pub use edge::{Edge, EdgeError};
pub use itinerary::{Itinerary, TripSummary};
pub use location::{Categories, Location};
pub use planner::{PlanError, RoutePlanner, RouteQuery, build_route};
pub use store::{GraphStore, GraphStoreError, LocationCatalogue, MemoryGraph};
#[cfg(feature = "store-sqlite")]
pub use store::{
    GraphSnapshot, PersistGraphError, RatingRecord, RouteRecord, SqliteGraphStore,
    SqliteGraphStoreError, persist_graph,
};
