//! Category post-filter applied to a finished route.

use crate::Location;

/// Keep the stops that match `category`, in order.
///
/// The source and any stop named after the destination district are always
/// kept. Without a category every stop is kept. Filtering runs after route
/// construction, so intermediate stops may disappear from the output; the
/// filter is idempotent.
///
/// # Examples
/// ```
/// use bonvoyage_core::{Location, retain_category};
///
/// let route = vec![
///     Location::new(1, "Dhaka", "Dhaka"),
///     Location::new(2, "Ahsan Manzil", "Dhaka").with_category("heritage"),
///     Location::new(3, "Hatirjheel", "Dhaka").with_category("urban"),
/// ];
/// let kept = retain_category(route, "Dhaka", "Dhaka", Some("heritage"));
/// let names: Vec<_> = kept.iter().map(|stop| stop.name.as_str()).collect();
/// assert_eq!(names, ["Dhaka", "Ahsan Manzil"]);
/// ```
#[must_use]
pub fn retain_category(
    route: Vec<Location>,
    source: &str,
    destination_district: &str,
    category: Option<&str>,
) -> Vec<Location> {
    let Some(wanted) = category else {
        return route;
    };
    route
        .into_iter()
        .filter(|stop| {
            stop.name == source || stop.name == destination_district || stop.has_category(wanted)
        })
        .collect()
}
