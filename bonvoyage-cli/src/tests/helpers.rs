//! Fixtures for building request files and seeded graph databases.

use bonvoyage_core::{GraphSnapshot, Location, RatingRecord, RouteRecord, persist_graph};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory addressed through UTF-8 paths.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Sylhet's hub with two rated sights and one visitor rating.
pub(super) fn sylhet_snapshot() -> GraphSnapshot {
    GraphSnapshot {
        locations: vec![
            Location::new(1, "Sylhet", "Sylhet"),
            Location::new(2, "Ratargul", "Sylhet")
                .with_rating(4.5)
                .with_category("forest")
                .with_image("pics/ratargul.jpg"),
            Location::new(3, "Lalakhal", "Sylhet")
                .with_rating(4.8)
                .with_category("river")
                .with_image("pics/lalakhal.jpg"),
        ],
        routes: vec![
            route("Sylhet", "Ratargul", 60, 200),
            route("Sylhet", "Lalakhal", 90, 300),
        ],
        ratings: vec![RatingRecord {
            username: "rahim".to_owned(),
            location: "Lalakhal".to_owned(),
            value: 5.0,
        }],
    }
}

fn route(source: &str, destination: &str, travel_time: u32, travel_cost: u32) -> RouteRecord {
    RouteRecord {
        source: source.to_owned(),
        destination: destination.to_owned(),
        travel_time,
        travel_cost,
    }
}

/// Persist [`sylhet_snapshot`] into `root/bonvoyage.db`.
pub(super) fn seed_database(root: &Utf8Path) -> Utf8PathBuf {
    let database = root.join("bonvoyage.db");
    persist_graph(&database, &sylhet_snapshot()).expect("seed database");
    database
}

pub(super) fn write_request(path: &Utf8Path, body: &serde_json::Value) {
    let payload = serde_json::to_vec_pretty(body).expect("serialise request");
    write_utf8(path, &payload);
}
