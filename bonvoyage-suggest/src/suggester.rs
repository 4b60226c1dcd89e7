//! Request-level route suggestion.
#![forbid(unsafe_code)]

use bonvoyage_core::{GraphStore, LocationCatalogue, PlannerConfig, RoutePlanner};
use log::debug;

use crate::{LocationView, MediaConfig, SuggestError, SuggestRequest, SuggestResponse};

/// Answers [`SuggestRequest`]s with planned routes.
#[derive(Debug, Clone)]
pub struct RouteSuggester<S> {
    planner: RoutePlanner<S>,
    media: MediaConfig,
}

impl<S> RouteSuggester<S>
where
    S: GraphStore + LocationCatalogue,
{
    /// Suggester with the default planner limits.
    pub fn new(store: S, media: MediaConfig) -> Self {
        Self::with_config(store, PlannerConfig::default(), media)
    }

    /// Suggester with explicit planner limits.
    pub const fn with_config(store: S, config: PlannerConfig, media: MediaConfig) -> Self {
        Self {
            planner: RoutePlanner::with_config(store, config),
            media,
        }
    }

    /// Validate `request`, plan the route and present its stops.
    ///
    /// When `viewer` names a user, each stop carries that user's rating.
    /// An unknown source yields an empty route rather than an error.
    ///
    /// # Errors
    /// Validation failures are reported as client errors (see
    /// [`SuggestError::status`]); planner and store failures as
    /// [`SuggestError::Plan`] and [`SuggestError::Store`].
    pub fn suggest(
        &self,
        request: &SuggestRequest,
        viewer: Option<&str>,
    ) -> Result<SuggestResponse, SuggestError> {
        let query = request.to_query()?;
        debug!(
            "suggesting route {} -> {} (budget {:?}, days {:?}, category {:?})",
            query.source, query.destination_district, query.budget, query.day_limit, query.category
        );
        let itinerary = self.planner.plan(&query)?;
        let viewer = viewer.filter(|name| !name.is_empty());

        let route = itinerary
            .into_stops()
            .into_iter()
            .map(|stop| {
                let id = stop.id;
                let view = LocationView::new(stop, &self.media);
                match viewer {
                    Some(username) => {
                        let rating = self.planner.store().user_rating(username, id)?;
                        Ok(view.with_user_rating(rating))
                    }
                    None => Ok(view),
                }
            })
            .collect::<Result<Vec<_>, SuggestError>>()?;
        Ok(SuggestResponse { route })
    }
}
