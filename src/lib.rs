//! Facade crate for the Bon Voyage route planning engine.
//!
//! This crate re-exports the core graph and planner types, and exposes the
//! request-facing suggestion layer behind the `suggest` feature.

#![forbid(unsafe_code)]

pub use bonvoyage_core::{
    Categories, Edge, EdgeError, GraphStore, GraphStoreError, Itinerary, Location,
    LocationCatalogue, MemoryGraph, PlanError, PlannerConfig, RoutePlanner, RouteQuery,
    TripSummary, build_route, retain_category,
};

#[cfg(feature = "store-sqlite")]
pub use bonvoyage_core::{
    GraphSnapshot, PersistGraphError, RatingRecord, RouteRecord, SqliteGraphStore,
    SqliteGraphStoreError, persist_graph,
};

#[cfg(feature = "suggest")]
pub use bonvoyage_suggest::{
    Catalogue, LocationView, MediaConfig, RouteSuggester, SuggestError, SuggestRequest,
    SuggestResponse,
};
