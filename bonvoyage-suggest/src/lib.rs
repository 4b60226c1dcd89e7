//! Route suggestions and location browsing for Bon Voyage.
//!
//! The crate sits between callers and the planner in [`bonvoyage_core`]:
//! - **Route suggestion** validates a [`SuggestRequest`] (trip dates, budget
//!   and tier arriving as numbers or strings, an optional category), turns it
//!   into a [`RouteQuery`](bonvoyage_core::RouteQuery) and presents the
//!   planned stops as [`LocationView`]s with absolute image URLs and, for a
//!   known viewer, their own ratings.
//! - **Catalogue queries** list locations by category and fetch a single
//!   location by identifier.
//!
//! # Examples
//!
//! ```
//! use bonvoyage_core::{Edge, Location, MemoryGraph};
//! use bonvoyage_suggest::{MediaConfig, RouteSuggester, SuggestRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dhaka = Location::new(1, "Dhaka", "Dhaka");
//! let lalbagh = Location::new(2, "Lalbagh Fort", "Dhaka")
//!     .with_rating(4.4)
//!     .with_image("pics/lalbagh.jpg");
//! let graph = MemoryGraph::new()
//!     .with_locations([dhaka.clone(), lalbagh.clone()])
//!     .with_edge(Edge::new(dhaka, lalbagh, 40, 150)?);
//!
//! let suggester = RouteSuggester::new(graph, MediaConfig::parse("https://bonvoyage.example/media/")?);
//! let request = SuggestRequest::new("Dhaka", "Dhaka").with_budget("5000");
//! let response = suggester.suggest(&request, None)?;
//!
//! assert_eq!(response.names().collect::<Vec<_>>(), ["Dhaka", "Lalbagh Fort"]);
//! assert_eq!(
//!     response.route[1].image.as_deref(),
//!     Some("https://bonvoyage.example/media/pics/lalbagh.jpg"),
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod catalogue;
mod error;
mod media;
mod request;
mod suggester;
mod view;

pub use catalogue::Catalogue;
pub use error::{ErrorBody, SuggestError};
pub use media::MediaConfig;
pub use request::{Amount, SuggestRequest};
pub use suggester::RouteSuggester;
pub use view::{LocationView, SuggestResponse};
