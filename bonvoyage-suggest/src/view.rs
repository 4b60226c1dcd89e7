//! Serialisable views of locations and suggested routes.
#![forbid(unsafe_code)]

use bonvoyage_core::Location;
use serde::Serialize;

use crate::MediaConfig;

/// A location as presented to callers.
///
/// `user_rating` is omitted entirely when no viewer is known and is `null`
/// when the viewer has not rated the location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    /// Store identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Absolute image URL.
    pub image: Option<String>,
    /// Free-form description.
    pub description: String,
    /// Average visitor rating.
    pub rating: f64,
    /// District the location belongs to.
    pub district: String,
    /// Category tags, deduplicated and in lexical order rather than the
    /// order they were stored in.
    pub category: Vec<String>,
    /// The viewer's own rating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<Option<f64>>,
}

impl LocationView {
    /// Present `location`, resolving its image against `media`.
    #[must_use]
    pub fn new(location: Location, media: &MediaConfig) -> Self {
        let image = location
            .image
            .as_deref()
            .and_then(|path| media.resolve(path));
        Self {
            id: location.id,
            name: location.name,
            image,
            description: location.description,
            rating: location.rating,
            district: location.district,
            category: location.categories.into_iter().collect(),
            user_rating: None,
        }
    }

    /// Attach the viewer's rating.
    #[must_use]
    pub const fn with_user_rating(mut self, rating: Option<f64>) -> Self {
        self.user_rating = Some(rating);
        self
    }
}

/// Response body of a route suggestion: `{"route": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestResponse {
    /// Suggested stops in visiting order.
    pub route: Vec<LocationView>,
}

impl SuggestResponse {
    /// Names of the suggested stops.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.route.iter().map(|stop| stop.name.as_str())
    }
}
