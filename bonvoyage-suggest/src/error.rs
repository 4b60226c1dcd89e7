//! Error types raised while validating and answering suggestion requests.
#![forbid(unsafe_code)]

use bonvoyage_core::{GraphStoreError, PlanError};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by [`RouteSuggester`](crate::RouteSuggester) and
/// [`Catalogue`](crate::Catalogue).
///
/// Validation failures display the message shown to the caller verbatim.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The trip ends before it starts.
    #[error("End date must be after start date.")]
    EndBeforeStart {
        /// Parsed start date.
        start: NaiveDate,
        /// Parsed end date.
        end: NaiveDate,
    },
    /// A trip date is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate {
        /// Raw value supplied by the caller.
        value: String,
        /// Source error from `chrono`.
        #[source]
        source: chrono::ParseError,
    },
    /// The budget or tier is neither a number nor a numeric string.
    #[error("Budget and tier must be numbers.")]
    NonNumericBudget {
        /// Request field holding the value.
        field: &'static str,
        /// Raw value supplied by the caller.
        value: String,
    },
    /// The tier would divide the budget by zero.
    #[error("Tier must not be zero.")]
    ZeroTier,
    /// No location has the requested identifier.
    #[error("Location not found")]
    LocationNotFound {
        /// Requested identifier.
        id: u64,
    },
    /// Planning the route failed.
    #[error("failed to plan route")]
    Plan(#[from] PlanError),
    /// Reading locations or ratings failed.
    #[error("failed to read locations")]
    Store(#[from] GraphStoreError),
}

impl SuggestError {
    /// HTTP-style status code for the error.
    ///
    /// Validation failures map to `400`, unknown locations to `404` and
    /// everything else to `500`.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::EndBeforeStart { .. }
            | Self::InvalidDate { .. }
            | Self::NonNumericBudget { .. }
            | Self::ZeroTier => 400,
            Self::LocationNotFound { .. } => 404,
            Self::Plan(_) | Self::Store(_) => 500,
        }
    }

    /// Whether the caller, rather than the data or the backend, is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status(), 400..=499)
    }

    /// JSON body describing the error.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// Serialised form of a [`SuggestError`], e.g. `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}
