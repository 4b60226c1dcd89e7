//! Location listing and detail queries.
#![forbid(unsafe_code)]

use bonvoyage_core::{Location, LocationCatalogue};
use log::debug;

use crate::{LocationView, MediaConfig, SuggestError};

/// Browsable view over the stored locations.
#[derive(Debug, Clone)]
pub struct Catalogue<S> {
    store: S,
    media: MediaConfig,
}

impl<S> Catalogue<S>
where
    S: LocationCatalogue,
{
    /// Catalogue over `store`, resolving images against `media`.
    pub const fn new(store: S, media: MediaConfig) -> Self {
        Self { store, media }
    }

    /// Locations tagged with `category`, best rated first.
    ///
    /// District hubs (locations named after their district) are never
    /// listed. Without a category, or with a blank one, every other location
    /// is returned. Equal ratings keep identifier order.
    ///
    /// # Errors
    /// Returns [`SuggestError::Store`] when the store fails.
    pub fn by_category(&self, category: Option<&str>) -> Result<Vec<LocationView>, SuggestError> {
        let wanted = category.filter(|value| !value.trim().is_empty());
        let mut locations: Vec<Location> = self
            .store
            .all_locations()?
            .into_iter()
            .filter(|location| !location.is_district_hub())
            .filter(|location| wanted.is_none_or(|tag| location.has_category(tag)))
            .collect();
        locations.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        debug!("catalogue lists {} locations for {wanted:?}", locations.len());
        Ok(locations
            .into_iter()
            .map(|location| LocationView::new(location, &self.media))
            .collect())
    }

    /// One location by identifier.
    ///
    /// # Errors
    /// Returns [`SuggestError::LocationNotFound`] for an unknown identifier
    /// and [`SuggestError::Store`] when the store fails.
    pub fn detail(&self, id: u64) -> Result<LocationView, SuggestError> {
        let location = self
            .store
            .location_by_id(id)?
            .ok_or(SuggestError::LocationNotFound { id })?;
        Ok(LocationView::new(location, &self.media))
    }
}
