//! Tourist locations, the vertices of the planning graph.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category tags attached to a [`Location`], e.g. `"nature"` or `"heritage"`.
///
/// Tags are kept deduplicated in lexical order, not in insertion order.
pub type Categories = BTreeSet<String>;

/// A place worth visiting.
///
/// `name` is unique across the store. `district` groups locations into the
/// zones that route queries target; a location whose name equals its district
/// acts as the district's hub.
///
/// # Examples
/// ```
/// use bonvoyage_core::Location;
///
/// let lake = Location::new(7, "Kaptai Lake", "Rangamati")
///     .with_rating(4.2)
///     .with_category("nature");
///
/// assert!(lake.has_category("nature"));
/// assert!(!lake.is_district_hub());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Store identifier.
    pub id: u64,
    /// Unique display name.
    pub name: String,
    /// District the location belongs to.
    pub district: String,
    /// Average visitor rating. Only used to prioritise stops.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: f64,
    /// Category tags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: Categories,
    /// Media path of the cover image, relative to the media root.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image: Option<String>,
    /// Free-form description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Location {
    /// Construct an unrated, untagged location.
    pub fn new(id: u64, name: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            district: district.into(),
            rating: 0.0,
            categories: Categories::new(),
            image: None,
            description: String::new(),
        }
    }

    /// Set the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Add a category tag.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Set the image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether the location carries `category`.
    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Whether the location stands for its whole district.
    #[must_use]
    pub fn is_district_hub(&self) -> bool {
        self.name == self.district
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn builder_collects_categories() {
        let location = Location::new(1, "Sajek Valley", "Rangamati")
            .with_category("nature")
            .with_category("hiking")
            .with_category("nature");
        assert_eq!(location.categories.len(), 2);
        assert!(location.has_category("hiking"));
        assert!(!location.has_category("beach"));
    }

    #[rstest]
    #[case("Sylhet", "Sylhet", true)]
    #[case("Ratargul", "Sylhet", false)]
    fn detects_district_hubs(#[case] name: &str, #[case] district: &str, #[case] hub: bool) {
        assert_eq!(Location::new(1, name, district).is_district_hub(), hub);
    }
}
