//! SQLite schema shared by the graph reader and writer.

/// Tables the reader refuses to open a database without.
pub(crate) const REQUIRED_TABLES: [&str; 3] = ["locations", "routes", "ratings"];

/// Schema creation statements, safe to run against an existing database.
///
/// `categories` stores a JSON array of strings. `routes.id` fixes the stable
/// order in which edges are returned.
pub(crate) const CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    district TEXT NOT NULL,
    rating REAL NOT NULL DEFAULT 0,
    categories TEXT NOT NULL DEFAULT '[]',
    image TEXT,
    description TEXT NOT NULL DEFAULT ''
);
CREATE INDEX IF NOT EXISTS locations_district ON locations (district);
CREATE TABLE IF NOT EXISTS routes (
    id INTEGER PRIMARY KEY,
    source_id INTEGER NOT NULL REFERENCES locations (id) ON DELETE CASCADE,
    destination_id INTEGER NOT NULL REFERENCES locations (id) ON DELETE CASCADE,
    travel_time INTEGER NOT NULL,
    travel_cost INTEGER NOT NULL,
    UNIQUE (source_id, destination_id)
);
CREATE TABLE IF NOT EXISTS ratings (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL,
    location_id INTEGER NOT NULL REFERENCES locations (id) ON DELETE CASCADE,
    value REAL NOT NULL,
    UNIQUE (username, location_id)
);
";

/// Columns selected for a location row, in the order row readers expect.
pub(crate) const LOCATION_COLUMNS: &str =
    "id, name, district, rating, categories, image, description";
