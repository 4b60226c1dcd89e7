//! Unit tests for importing graph snapshots.

use super::helpers::{sylhet_snapshot, workspace, write_utf8};
use super::*;
use crate::import::{ImportArgs, ImportConfig, ImportSummary, execute_import};
use bonvoyage_core::{GraphStore, SqliteGraphStore};
use camino::Utf8PathBuf;
use rstest::rstest;

#[rstest]
fn converting_import_without_graph_errors() {
    let err = ImportConfig::try_from(ImportArgs::default()).expect_err("missing graph");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_IMPORT_GRAPH);
            assert_eq!(env, ENV_IMPORT_GRAPH);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn imports_snapshot_and_reports_counts() {
    let (_tmp, root) = workspace();
    let graph_path = root.join("graph.json");
    let payload = serde_json::to_vec(&sylhet_snapshot()).expect("serialise snapshot");
    write_utf8(&graph_path, &payload);
    let database = root.join("nested").join("bonvoyage.db");

    let config = ImportConfig {
        graph_path,
        database: database.clone(),
    };
    let summary = execute_import(&config).expect("import");
    assert_eq!(
        summary,
        ImportSummary {
            locations: 3,
            routes: 2,
            ratings: 1,
        }
    );

    let again = execute_import(&config).expect("re-import is idempotent");
    assert_eq!(again, summary);

    let store = SqliteGraphStore::open(database.as_std_path()).expect("open store");
    let source = store
        .location_by_name("Sylhet")
        .expect("query")
        .expect("hub imported");
    assert_eq!(source.id, 1);
    assert_eq!(store.edges_into_district("Sylhet").expect("edges").len(), 2);
}

#[rstest]
fn rejects_malformed_snapshot() {
    let (_tmp, root) = workspace();
    let graph_path = root.join("graph.json");
    write_utf8(&graph_path, br#"{"locations": "Sylhet"}"#);

    let config = ImportConfig {
        graph_path: graph_path.clone(),
        database: root.join("bonvoyage.db"),
    };
    let err = execute_import(&config).expect_err("malformed snapshot");
    match err {
        CliError::ParseInput { path, what, .. } => {
            assert_eq!(path, graph_path);
            assert_eq!(what, "graph snapshot");
        }
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn missing_snapshot_is_reported() {
    let config = ImportConfig {
        graph_path: Utf8PathBuf::from("/definitely/not/here.json"),
        database: Utf8PathBuf::from(DEFAULT_DATABASE),
    };
    let err = execute_import(&config).expect_err("missing snapshot");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_IMPORT_GRAPH),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}
