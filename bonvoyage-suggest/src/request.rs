//! Route suggestion requests and their validation.
#![forbid(unsafe_code)]

use std::num::FpCategory;

use bonvoyage_core::RouteQuery;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::SuggestError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A numeric request field that may arrive as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// A JSON number.
    Number(f64),
    /// A string expected to hold a number, e.g. `"15000"`.
    Text(String),
}

impl Amount {
    /// Parse the amount.
    ///
    /// Returns `Ok(None)` for a blank string.
    fn value(&self, field: &'static str) -> Result<Option<f64>, SuggestError> {
        match self {
            Self::Number(number) => Ok(Some(*number)),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|number| !number.is_nan())
                    .map(Some)
                    .ok_or_else(|| SuggestError::NonNumericBudget {
                        field,
                        value: text.clone(),
                    })
            }
        }
    }

    /// Whether the form left the field unset: a JSON number zero or a blank
    /// string. A numeric string such as `"0"` counts as set.
    fn is_unset(&self) -> bool {
        match self {
            Self::Number(number) => is_zero(*number),
            Self::Text(text) => text.trim().is_empty(),
        }
    }
}

/// Parse `amount` unless it is missing or unset.
fn provided(amount: Option<&Amount>, field: &'static str) -> Result<Option<f64>, SuggestError> {
    match amount {
        Some(amount) if !amount.is_unset() => amount.value(field),
        _ => Ok(None),
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A request for a suggested route, as posted by the trip form.
///
/// # Examples
/// ```
/// use bonvoyage_suggest::SuggestRequest;
///
/// let request: SuggestRequest = serde_json::from_str(
///     r#"{
///         "source": "Dhaka",
///         "destination": "Sylhet",
///         "budget": "12000",
///         "tier": 2,
///         "start_date": "2025-07-08",
///         "end_date": "2025-07-10"
///     }"#,
/// )?;
/// let query = request.to_query()?;
/// assert_eq!(query.budget, Some(6_000.0));
/// assert_eq!(query.day_limit, Some(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestRequest {
    /// Name of the starting location.
    pub source: String,
    /// District the trip heads into.
    pub destination: String,
    /// Total budget. Missing, null, blank or the number zero means unlimited.
    pub budget: Option<Amount>,
    /// Number of travellers sharing the budget.
    pub tier: Option<Amount>,
    /// First trip day, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last trip day, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Category kept in the suggested route.
    pub category: Option<String>,
}

impl SuggestRequest {
    /// Request from `source` into `destination` without constraints.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Set the budget.
    #[must_use]
    pub fn with_budget(mut self, budget: impl Into<Amount>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    /// Set the tier.
    #[must_use]
    pub fn with_tier(mut self, tier: impl Into<Amount>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    /// Set the trip dates.
    #[must_use]
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Set the category filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Number of trip days, counting both ends.
    ///
    /// Returns `Ok(None)` unless both dates are present and non-empty.
    ///
    /// # Errors
    /// [`SuggestError::InvalidDate`] when a date does not parse and
    /// [`SuggestError::EndBeforeStart`] when the end precedes the start.
    pub fn trip_days(&self) -> Result<Option<u32>, SuggestError> {
        let (Some(start), Some(end)) = (
            non_blank(self.start_date.as_deref()),
            non_blank(self.end_date.as_deref()),
        ) else {
            return Ok(None);
        };
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        if end < start {
            return Err(SuggestError::EndBeforeStart { start, end });
        }
        let days = end.signed_duration_since(start).num_days().saturating_add(1);
        Ok(Some(u32::try_from(days).unwrap_or(u32::MAX)))
    }

    /// Budget available to the planner after dividing by the tier.
    ///
    /// A missing, null or blank budget, or the number zero, means unlimited
    /// and skips the tier entirely. A numeric string such as `"0"` is a real
    /// budget of zero. The tier is unset under the same rules and then leaves
    /// the budget undivided.
    ///
    /// # Errors
    /// [`SuggestError::NonNumericBudget`] when either value is not numeric and
    /// [`SuggestError::ZeroTier`] when a tier string parses to zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "the budget is shared evenly across the tier"
    )]
    pub fn effective_budget(&self) -> Result<Option<f64>, SuggestError> {
        let Some(budget) = provided(self.budget.as_ref(), "budget")? else {
            return Ok(None);
        };
        match provided(self.tier.as_ref(), "tier")? {
            None => Ok(Some(budget)),
            Some(tier) if is_zero(tier) => Err(SuggestError::ZeroTier),
            Some(tier) => Ok(Some(budget / tier)),
        }
    }

    /// Category filter, ignoring blank values.
    #[must_use]
    pub fn category_filter(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Validate the request and translate it into a planner query.
    ///
    /// Dates are checked before the budget.
    ///
    /// # Errors
    /// See [`SuggestRequest::trip_days`] and
    /// [`SuggestRequest::effective_budget`].
    pub fn to_query(&self) -> Result<RouteQuery, SuggestError> {
        let day_limit = self.trip_days()?;
        let budget = self.effective_budget()?;
        let mut query = RouteQuery::new(self.source.as_str(), self.destination.as_str());
        query.budget = budget;
        query.day_limit = day_limit;
        query.category = self.category_filter().map(str::to_owned);
        Ok(query)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

fn parse_date(value: &str) -> Result<NaiveDate, SuggestError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| {
        SuggestError::InvalidDate {
            value: value.to_owned(),
            source,
        }
    })
}

fn is_zero(value: f64) -> bool {
    value.classify() == FpCategory::Zero
}
