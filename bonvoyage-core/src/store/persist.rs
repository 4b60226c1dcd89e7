//! Writing location graphs to SQLite.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::debug;
use rusqlite::{Connection, Error as SqliteError, Transaction};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema::CREATE_SCHEMA;
use crate::Location;

/// A route between two named locations, as imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Name of the departure location.
    pub source: String,
    /// Name of the arrival location.
    pub destination: String,
    /// Travel time in minutes.
    pub travel_time: u32,
    /// Travel cost in currency units.
    pub travel_cost: u32,
}

/// A visitor's rating of a named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// Account that gave the rating.
    pub username: String,
    /// Name of the rated location.
    pub location: String,
    /// Rating value.
    pub value: f64,
}

/// Everything needed to seed a graph database.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Locations to upsert, keyed by id.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Routes to upsert, keyed by their ordered endpoint pair.
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    /// Ratings to upsert, keyed by user and location.
    #[serde(default)]
    pub ratings: Vec<RatingRecord>,
}

/// Errors raised when persisting a graph to SQLite.
#[derive(Debug, Error)]
pub enum PersistGraphError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning or committing the transaction failed.
    #[error("failed to {action} graph persistence transaction")]
    Transaction {
        /// Whether the transaction was being opened or committed.
        action: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the graph tables failed.
    #[error("failed to create graph schema")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A location identifier could not be represented as an SQLite integer.
    #[error("location id {id} exceeds SQLite i64 range")]
    LocationIdOutOfRange {
        /// Identifier that failed the conversion.
        id: u64,
    },
    /// Serializing categories to JSON failed.
    #[error("failed to serialize categories for location {location}")]
    SerializeCategories {
        /// Name of the location.
        location: String,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// A route had a zero travel time.
    #[error("route {source_name} -> {destination} must take at least one minute")]
    ZeroTravelTime {
        /// Name of the departure location.
        source_name: String,
        /// Name of the arrival location.
        destination: String,
    },
    /// A route or rating referenced a location that does not exist.
    #[error("{record} references unknown location {location}")]
    UnknownLocation {
        /// Kind of record being written.
        record: &'static str,
        /// Name that failed to resolve.
        location: String,
    },
    /// Writing a row failed.
    #[error("failed to persist {record} {key}")]
    PersistRow {
        /// Kind of record being written.
        record: &'static str,
        /// Human-readable key of the row.
        key: String,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist a graph snapshot to a SQLite database on disk.
///
/// The write is idempotent: rows are upserted, parent directories are created
/// and the schema is initialised when missing. Everything happens in one
/// transaction, so a failed import leaves the database untouched.
///
/// # Errors
/// Returns [`PersistGraphError`] when the database cannot be written or the
/// snapshot references unknown locations.
pub fn persist_graph(path: &Utf8Path, snapshot: &GraphSnapshot) -> Result<(), PersistGraphError> {
    ensure_parent_dir(path)?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistGraphError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let transaction = connection
        .transaction()
        .map_err(|source| PersistGraphError::Transaction {
            action: "begin",
            source,
        })?;

    transaction
        .execute_batch(CREATE_SCHEMA)
        .map_err(|source| PersistGraphError::CreateSchema { source })?;
    persist_locations(&transaction, &snapshot.locations)?;
    persist_routes(&transaction, &snapshot.routes)?;
    persist_ratings(&transaction, &snapshot.ratings)?;

    transaction
        .commit()
        .map_err(|source| PersistGraphError::Transaction {
            action: "commit",
            source,
        })?;
    debug!(
        "persisted {} locations, {} routes and {} ratings to {path}",
        snapshot.locations.len(),
        snapshot.routes.len(),
        snapshot.ratings.len()
    );
    Ok(())
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), PersistGraphError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base, relative) = if parent.is_absolute() {
        ("/", parent.strip_prefix("/").unwrap_or(parent))
    } else {
        (".", parent)
    };
    let to_error = |source: std::io::Error| PersistGraphError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
    };
    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority()).map_err(to_error)?;
    dir.create_dir_all(relative).map_err(to_error)
}

fn persist_locations(
    transaction: &Transaction<'_>,
    locations: &[Location],
) -> Result<(), PersistGraphError> {
    let mut statement = transaction
        .prepare(
            "INSERT INTO locations (id, name, district, rating, categories, image, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (id) DO UPDATE SET
                name = excluded.name,
                district = excluded.district,
                rating = excluded.rating,
                categories = excluded.categories,
                image = excluded.image,
                description = excluded.description",
        )
        .map_err(|source| row_error("location statement", String::new(), source))?;

    for location in locations {
        let id = i64::try_from(location.id)
            .map_err(|_| PersistGraphError::LocationIdOutOfRange { id: location.id })?;
        let categories = serde_json::to_string(&location.categories).map_err(|source| {
            PersistGraphError::SerializeCategories {
                location: location.name.clone(),
                source,
            }
        })?;
        statement
            .execute((
                id,
                &location.name,
                &location.district,
                location.rating,
                categories,
                &location.image,
                &location.description,
            ))
            .map_err(|source| row_error("location", location.name.clone(), source))?;
    }
    Ok(())
}

fn persist_routes(
    transaction: &Transaction<'_>,
    routes: &[RouteRecord],
) -> Result<(), PersistGraphError> {
    let mut statement = transaction
        .prepare(
            "INSERT INTO routes (source_id, destination_id, travel_time, travel_cost)
             SELECT s.id, d.id, ?3, ?4 FROM locations AS s, locations AS d
             WHERE s.name = ?1 AND d.name = ?2
             ON CONFLICT (source_id, destination_id) DO UPDATE SET
                travel_time = excluded.travel_time,
                travel_cost = excluded.travel_cost",
        )
        .map_err(|source| row_error("route statement", String::new(), source))?;

    for route in routes {
        if route.travel_time == 0 {
            return Err(PersistGraphError::ZeroTravelTime {
                source_name: route.source.clone(),
                destination: route.destination.clone(),
            });
        }
        let key = format!("{} -> {}", route.source, route.destination);
        let written = statement
            .execute((
                &route.source,
                &route.destination,
                route.travel_time,
                route.travel_cost,
            ))
            .map_err(|source| row_error("route", key.clone(), source))?;
        if written == 0 {
            return Err(unknown_endpoint(transaction, route)?);
        }
    }
    Ok(())
}

fn unknown_endpoint(
    transaction: &Transaction<'_>,
    route: &RouteRecord,
) -> Result<PersistGraphError, PersistGraphError> {
    let source_known = location_exists(transaction, &route.source)?;
    let location = if source_known {
        route.destination.clone()
    } else {
        route.source.clone()
    };
    Ok(PersistGraphError::UnknownLocation {
        record: "route",
        location,
    })
}

fn location_exists(transaction: &Transaction<'_>, name: &str) -> Result<bool, PersistGraphError> {
    transaction
        .query_row(
            "SELECT EXISTS (SELECT 1 FROM locations WHERE name = ?1)",
            [name],
            |row| row.get(0),
        )
        .map_err(|source| row_error("location lookup", name.to_owned(), source))
}

fn persist_ratings(
    transaction: &Transaction<'_>,
    ratings: &[RatingRecord],
) -> Result<(), PersistGraphError> {
    let mut statement = transaction
        .prepare(
            "INSERT INTO ratings (username, location_id, value)
             SELECT ?1, id, ?3 FROM locations WHERE name = ?2
             ON CONFLICT (username, location_id) DO UPDATE SET value = excluded.value",
        )
        .map_err(|source| row_error("rating statement", String::new(), source))?;

    for rating in ratings {
        let key = format!("{} by {}", rating.location, rating.username);
        let written = statement
            .execute((&rating.username, &rating.location, rating.value))
            .map_err(|source| row_error("rating", key, source))?;
        if written == 0 {
            return Err(PersistGraphError::UnknownLocation {
                record: "rating",
                location: rating.location.clone(),
            });
        }
    }
    Ok(())
}

fn row_error(record: &'static str, key: String, source: SqliteError) -> PersistGraphError {
    PersistGraphError::PersistRow {
        record,
        key,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    #[fixture]
    fn snapshot() -> GraphSnapshot {
        GraphSnapshot {
            locations: vec![
                Location::new(1, "Khulna", "Khulna"),
                Location::new(2, "Sundarbans", "Khulna").with_category("forest"),
            ],
            routes: vec![RouteRecord {
                source: "Khulna".into(),
                destination: "Sundarbans".into(),
                travel_time: 180,
                travel_cost: 800,
            }],
            ratings: Vec::new(),
        }
    }

    fn count(path: &Utf8Path, table: &str) -> i64 {
        let connection = Connection::open(path.as_std_path()).expect("open database");
        connection
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .expect("count rows")
    }

    #[rstest]
    fn persisting_twice_is_idempotent(temp_dir: TempDir, snapshot: GraphSnapshot) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("graph.db")).expect("utf-8");
        persist_graph(&path, &snapshot).expect("first import");
        persist_graph(&path, &snapshot).expect("second import");
        assert_eq!(count(&path, "locations"), 2);
        assert_eq!(count(&path, "routes"), 1);
    }

    #[rstest]
    fn creates_parent_directory(temp_dir: TempDir, snapshot: GraphSnapshot) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("nested/dir/graph.db"))
            .expect("utf-8");
        persist_graph(&path, &snapshot).expect("import into nested path");
        assert!(path.as_std_path().is_file());
    }

    #[rstest]
    fn rejects_route_to_unknown_location(temp_dir: TempDir, mut snapshot: GraphSnapshot) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("graph.db")).expect("utf-8");
        snapshot.routes.push(RouteRecord {
            source: "Khulna".into(),
            destination: "Mongla".into(),
            travel_time: 60,
            travel_cost: 100,
        });

        let error = persist_graph(&path, &snapshot).expect_err("unknown destination");
        assert!(matches!(
            error,
            PersistGraphError::UnknownLocation { record: "route", ref location } if location == "Mongla"
        ));
    }

    #[rstest]
    fn rejects_zero_travel_time(temp_dir: TempDir, mut snapshot: GraphSnapshot) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("graph.db")).expect("utf-8");
        snapshot.routes[0].travel_time = 0;
        let error = persist_graph(&path, &snapshot).expect_err("zero minutes");
        assert!(matches!(error, PersistGraphError::ZeroTravelTime { .. }));
    }

    #[rstest]
    fn upserts_ratings(temp_dir: TempDir, mut snapshot: GraphSnapshot) {
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("graph.db")).expect("utf-8");
        snapshot.ratings.push(RatingRecord {
            username: "nadia".into(),
            location: "Sundarbans".into(),
            value: 3.0,
        });
        persist_graph(&path, &snapshot).expect("first import");
        snapshot.ratings[0].value = 5.0;
        persist_graph(&path, &snapshot).expect("second import");

        let connection = Connection::open(path.as_std_path()).expect("open database");
        let value: f64 = connection
            .query_row("SELECT value FROM ratings", [], |row| row.get(0))
            .expect("read rating");
        assert!((value - 5.0).abs() < f64::EPSILON);
    }
}
