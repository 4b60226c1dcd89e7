//! SQLite-backed graph store.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use thiserror::Error;

use super::schema::{LOCATION_COLUMNS, REQUIRED_TABLES};
use super::{GraphStore, GraphStoreError, LocationCatalogue};
use crate::{Categories, Edge, EdgeError, Location};

/// Error raised when reading the persisted location graph.
#[derive(Debug, Error)]
pub enum SqliteGraphStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database lacks one of the graph tables.
    #[error("SQLite database has no {table} table")]
    MissingTable {
        /// Name of the missing table.
        table: &'static str,
    },
    /// A stored identifier was negative.
    #[error("location {location} has out-of-range id {id}")]
    LocationIdOutOfRange {
        /// Name of the offending location.
        location: String,
        /// Raw identifier read from SQLite.
        id: i64,
    },
    /// The stored category payload was not a JSON array of strings.
    #[error("failed to parse categories for location {location}: {source}")]
    InvalidCategories {
        /// Name of the offending location.
        location: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A stored travel time was zero, negative or too large.
    #[error("route {source_name} -> {destination} has invalid travel time {raw}")]
    InvalidTravelTime {
        /// Name of the departure location.
        source_name: String,
        /// Name of the arrival location.
        destination: String,
        /// Raw value read from SQLite.
        raw: i64,
    },
    /// A stored travel cost was negative or too large.
    #[error("route {source_name} -> {destination} has invalid travel cost {raw}")]
    InvalidTravelCost {
        /// Name of the departure location.
        source_name: String,
        /// Name of the arrival location.
        destination: String,
        /// Raw value read from SQLite.
        raw: i64,
    },
    /// A route references a departure location that is not stored.
    #[error("route {source_id} -> {destination} starts at an unknown location")]
    DanglingRoute {
        /// Identifier the route row points at.
        source_id: i64,
        /// Name of the arrival location.
        destination: String,
    },
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl From<SqliteGraphStoreError> for GraphStoreError {
    fn from(error: SqliteGraphStoreError) -> Self {
        let reason = error.to_string();
        match error {
            SqliteGraphStoreError::LocationIdOutOfRange { location, .. }
            | SqliteGraphStoreError::InvalidCategories { location, .. } => {
                Self::MalformedLocation { location, reason }
            }
            SqliteGraphStoreError::InvalidTravelTime {
                source_name,
                destination,
                ..
            }
            | SqliteGraphStoreError::InvalidTravelCost {
                source_name,
                destination,
                ..
            } => Self::MalformedEdge {
                source_name,
                destination,
                reason,
            },
            SqliteGraphStoreError::DanglingRoute {
                source_id,
                destination,
            } => Self::MalformedEdge {
                source_name: format!("#{source_id}"),
                destination,
                reason,
            },
            other => Self::Backend(Box::new(other)),
        }
    }
}

/// Read-only graph store over a SQLite database.
///
/// Every query reads the database afresh; callers that need a consistent
/// view across several lookups should hold on to the returned values.
pub struct SqliteGraphStore {
    connection: Connection,
    path: PathBuf,
}

impl fmt::Debug for SqliteGraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteGraphStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteGraphStore {
    /// Open the graph stored in the SQLite database at `path`.
    ///
    /// # Errors
    /// Returns [`SqliteGraphStoreError::OpenDatabase`] when the file cannot be
    /// opened and [`SqliteGraphStoreError::MissingTable`] when it lacks the
    /// graph schema.
    pub fn open<P>(path: P) -> Result<Self, SqliteGraphStoreError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteGraphStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        ensure_tables(&connection)?;
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    fn find_location_by_name(&self, name: &str) -> Result<Option<Location>, SqliteGraphStoreError> {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE name = ?1");
        let raw = self
            .connection
            .query_row(&query, [name], |row| RawLocation::read(row, 0))
            .optional()?;
        raw.map(RawLocation::into_location).transpose()
    }

    fn find_location_by_id(&self, id: u64) -> Result<Option<Location>, SqliteGraphStoreError> {
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1");
        let raw = self
            .connection
            .query_row(&query, [id], |row| RawLocation::read(row, 0))
            .optional()?;
        raw.map(RawLocation::into_location).transpose()
    }

    fn load_locations(&self) -> Result<Vec<Location>, SqliteGraphStoreError> {
        let query = format!("SELECT {LOCATION_COLUMNS} FROM locations ORDER BY id");
        let mut statement = self.connection.prepare(&query)?;
        let rows = statement
            .query_map([], |row| RawLocation::read(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawLocation::into_location).collect()
    }

    fn load_edges_into(&self, district: &str) -> Result<Vec<Edge>, SqliteGraphStoreError> {
        let mut statement = self.connection.prepare(
            "SELECT r.travel_time, r.travel_cost, r.source_id,
                    s.id, s.name, s.district, s.rating, s.categories, s.image, s.description,
                    d.id, d.name, d.district, d.rating, d.categories, d.image, d.description
             FROM routes AS r
             LEFT JOIN locations AS s ON s.id = r.source_id
             JOIN locations AS d ON d.id = r.destination_id
             WHERE d.district = ?1
             ORDER BY r.id",
        )?;
        let rows = statement
            .query_map([district], |row| {
                let source = match row.get::<_, Option<i64>>(3)? {
                    Some(_) => Some(RawLocation::read(row, 3)?),
                    None => None,
                };
                Ok(RawEdge {
                    travel_time: row.get(0)?,
                    travel_cost: row.get(1)?,
                    source_id: row.get(2)?,
                    source,
                    destination: RawLocation::read(row, 10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        let edges = rows
            .into_iter()
            .map(RawEdge::into_edge)
            .collect::<Result<Vec<_>, _>>()?;
        debug!("loaded {} edges into district {district}", edges.len());
        Ok(edges)
    }

    fn find_user_rating(
        &self,
        username: &str,
        location_id: u64,
    ) -> Result<Option<f64>, SqliteGraphStoreError> {
        let Ok(location_id) = i64::try_from(location_id) else {
            return Ok(None);
        };
        let value = self
            .connection
            .query_row(
                "SELECT value FROM ratings WHERE username = ?1 AND location_id = ?2",
                (username, location_id),
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl GraphStore for SqliteGraphStore {
    fn location_by_name(&self, name: &str) -> Result<Option<Location>, GraphStoreError> {
        Ok(self.find_location_by_name(name)?)
    }

    fn edges_into_district(&self, district: &str) -> Result<Vec<Edge>, GraphStoreError> {
        Ok(self.load_edges_into(district)?)
    }
}

impl LocationCatalogue for SqliteGraphStore {
    fn location_by_id(&self, id: u64) -> Result<Option<Location>, GraphStoreError> {
        Ok(self.find_location_by_id(id)?)
    }

    fn all_locations(&self) -> Result<Vec<Location>, GraphStoreError> {
        Ok(self.load_locations()?)
    }

    fn user_rating(
        &self,
        username: &str,
        location_id: u64,
    ) -> Result<Option<f64>, GraphStoreError> {
        Ok(self.find_user_rating(username, location_id)?)
    }
}

fn ensure_tables(connection: &Connection) -> Result<(), SqliteGraphStoreError> {
    for table in REQUIRED_TABLES {
        let found: Option<i64> = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        if found.is_none() {
            return Err(SqliteGraphStoreError::MissingTable { table });
        }
    }
    Ok(())
}

/// Location columns as stored, before validation.
struct RawLocation {
    id: i64,
    name: String,
    district: String,
    rating: f64,
    categories: String,
    image: Option<String>,
    description: String,
}

impl RawLocation {
    /// Read the seven location columns starting at `offset`.
    fn read(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            district: row.get(offset + 2)?,
            rating: row.get(offset + 3)?,
            categories: row.get(offset + 4)?,
            image: row.get(offset + 5)?,
            description: row.get(offset + 6)?,
        })
    }

    fn into_location(self) -> Result<Location, SqliteGraphStoreError> {
        let Ok(id) = u64::try_from(self.id) else {
            return Err(SqliteGraphStoreError::LocationIdOutOfRange {
                location: self.name,
                id: self.id,
            });
        };
        let categories: Categories = match serde_json::from_str(&self.categories) {
            Ok(categories) => categories,
            Err(source) => {
                return Err(SqliteGraphStoreError::InvalidCategories {
                    location: self.name,
                    source,
                });
            }
        };
        Ok(Location {
            id,
            name: self.name,
            district: self.district,
            rating: self.rating,
            categories,
            image: self.image,
            description: self.description,
        })
    }
}

struct RawEdge {
    travel_time: i64,
    travel_cost: i64,
    source_id: i64,
    /// `None` when the route's source row is missing.
    source: Option<RawLocation>,
    destination: RawLocation,
}

impl RawEdge {
    fn into_edge(self) -> Result<Edge, SqliteGraphStoreError> {
        let destination = self.destination.into_location()?;
        let Some(source) = self.source else {
            return Err(SqliteGraphStoreError::DanglingRoute {
                source_id: self.source_id,
                destination: destination.name,
            });
        };
        let source = source.into_location()?;
        let Ok(travel_cost) = u32::try_from(self.travel_cost) else {
            return Err(SqliteGraphStoreError::InvalidTravelCost {
                source_name: source.name,
                destination: destination.name,
                raw: self.travel_cost,
            });
        };
        let Ok(travel_time) = u32::try_from(self.travel_time) else {
            return Err(SqliteGraphStoreError::InvalidTravelTime {
                source_name: source.name,
                destination: destination.name,
                raw: self.travel_time,
            });
        };
        Edge::new(source, destination, travel_time, travel_cost).map_err(|error| match error {
            EdgeError::ZeroTravelTime {
                source_name,
                destination,
            } => SqliteGraphStoreError::InvalidTravelTime {
                source_name,
                destination,
                raw: 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persist::{GraphSnapshot, RatingRecord, RouteRecord, persist_graph};
    use crate::store::schema::CREATE_SCHEMA;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    fn route(source: &str, destination: &str, travel_time: u32) -> RouteRecord {
        RouteRecord {
            source: source.into(),
            destination: destination.into(),
            travel_time,
            travel_cost: 100,
        }
    }

    #[fixture]
    fn snapshot() -> GraphSnapshot {
        GraphSnapshot {
            locations: vec![
                Location::new(1, "Sylhet", "Sylhet"),
                Location::new(2, "Jaflong", "Sylhet")
                    .with_rating(4.6)
                    .with_category("nature")
                    .with_image("pics/jaflong.jpg"),
                Location::new(3, "Bisnakandi", "Sylhet").with_rating(4.1),
                Location::new(4, "Kuakata", "Patuakhali"),
            ],
            routes: vec![
                route("Sylhet", "Jaflong", 90),
                route("Jaflong", "Bisnakandi", 60),
                route("Sylhet", "Kuakata", 720),
            ],
            ratings: vec![RatingRecord {
                username: "rahim".into(),
                location: "Jaflong".into(),
                value: 5.0,
            }],
        }
    }

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn db_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("graph.db")).expect("utf-8 path")
    }

    fn open_store(dir: &TempDir, snapshot: &GraphSnapshot) -> SqliteGraphStore {
        let path = db_path(dir);
        persist_graph(&path, snapshot).expect("persist graph");
        SqliteGraphStore::open(path.as_std_path()).expect("open store")
    }

    #[rstest]
    fn resolves_locations_by_name(temp_dir: TempDir, snapshot: GraphSnapshot) {
        let store = open_store(&temp_dir, &snapshot);
        let jaflong = store
            .location_by_name("Jaflong")
            .expect("lookup")
            .expect("known location");
        assert_eq!(jaflong, snapshot.locations[1]);
        assert!(store.location_by_name("Dhaka").expect("lookup").is_none());
    }

    #[rstest]
    fn returns_edges_into_district_in_insertion_order(temp_dir: TempDir, snapshot: GraphSnapshot) {
        let store = open_store(&temp_dir, &snapshot);
        let edges = store.edges_into_district("Sylhet").expect("edges");
        let pairs: Vec<_> = edges
            .iter()
            .map(|edge| (edge.source.name.as_str(), edge.destination.name.as_str()))
            .collect();
        assert_eq!(pairs, [("Sylhet", "Jaflong"), ("Jaflong", "Bisnakandi")]);
        assert!(edges[0].destination.has_category("nature"));
    }

    #[rstest]
    fn serves_catalogue_lookups(temp_dir: TempDir, snapshot: GraphSnapshot) {
        let store = open_store(&temp_dir, &snapshot);
        assert_eq!(store.all_locations().expect("locations").len(), 4);
        assert_eq!(
            store.location_by_id(4).expect("lookup").map(|l| l.name),
            Some("Kuakata".to_owned())
        );
        assert_eq!(store.user_rating("rahim", 2).expect("rating"), Some(5.0));
        assert_eq!(store.user_rating("rahim", 3).expect("rating"), None);
    }

    #[rstest]
    fn rejects_database_without_schema(temp_dir: TempDir) {
        let path = temp_dir.path().join("empty.db");
        Connection::open(&path)
            .and_then(|c| c.execute_batch("CREATE TABLE other (id INTEGER)"))
            .expect("create unrelated database");

        let error = SqliteGraphStore::open(&path).expect_err("schema missing");
        assert!(matches!(
            error,
            SqliteGraphStoreError::MissingTable { table: "locations" }
        ));
    }

    #[rstest]
    fn reports_malformed_categories(temp_dir: TempDir) {
        let path = temp_dir.path().join("broken.db");
        let connection = Connection::open(&path).expect("create database");
        connection.execute_batch(CREATE_SCHEMA).expect("schema");
        connection
            .execute(
                "INSERT INTO locations (id, name, district, categories)
                 VALUES (1, 'Paharpur', 'Naogaon', 'not-json')",
                [],
            )
            .expect("insert row");
        drop(connection);

        let store = SqliteGraphStore::open(&path).expect("open store");
        let error = store
            .location_by_name("Paharpur")
            .expect_err("categories are malformed");
        assert!(matches!(
            error,
            GraphStoreError::MalformedLocation { ref location, .. } if location == "Paharpur"
        ));
    }

    #[rstest]
    fn reports_non_positive_travel_time(temp_dir: TempDir) {
        let path = temp_dir.path().join("broken.db");
        let connection = Connection::open(&path).expect("create database");
        connection.execute_batch(CREATE_SCHEMA).expect("schema");
        connection
            .execute_batch(
                "INSERT INTO locations (id, name, district) VALUES (1, 'Bogura', 'Bogura');
                 INSERT INTO locations (id, name, district) VALUES (2, 'Mahasthangarh', 'Bogura');
                 INSERT INTO routes (source_id, destination_id, travel_time, travel_cost)
                 VALUES (1, 2, 0, 50);",
            )
            .expect("insert rows");
        drop(connection);

        let store = SqliteGraphStore::open(&path).expect("open store");
        let error = store
            .edges_into_district("Bogura")
            .expect_err("zero travel time");
        assert!(matches!(
            error,
            GraphStoreError::MalformedEdge { ref destination, .. } if destination == "Mahasthangarh"
        ));
    }

    #[rstest]
    fn reports_routes_from_unknown_locations(temp_dir: TempDir) {
        let path = temp_dir.path().join("dangling.db");
        let connection = Connection::open(&path).expect("create database");
        connection.execute_batch(CREATE_SCHEMA).expect("schema");
        connection
            .execute_batch(
                "PRAGMA foreign_keys = OFF;
                 INSERT INTO locations (id, name, district) VALUES (2, 'Mahasthangarh', 'Bogura');
                 INSERT INTO routes (source_id, destination_id, travel_time, travel_cost)
                 VALUES (99, 2, 45, 50);",
            )
            .expect("insert rows");
        drop(connection);

        let store = SqliteGraphStore::open(&path).expect("open store");
        let error = store
            .edges_into_district("Bogura")
            .expect_err("route source is missing");
        assert!(matches!(
            error,
            GraphStoreError::MalformedEdge { ref source_name, ref destination, .. }
                if source_name == "#99" && destination == "Mahasthangarh"
        ));
    }
}
