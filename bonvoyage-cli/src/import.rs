//! Import command: seed the graph database from a JSON snapshot.

use std::io::Write;

use bonvoyage_core::{GraphSnapshot, persist_graph};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_IMPORT_GRAPH, CliError, DEFAULT_DATABASE, ENV_IMPORT_GRAPH, load_json,
    require_existing, write_json,
};

/// CLI arguments for the `import` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "import",
    long_about = "Write the locations, routes and ratings of a JSON graph \
                 snapshot into the SQLite database. Rows are upserted, so \
                 importing the same snapshot twice is harmless.",
    about = "Import a JSON graph snapshot"
)]
#[ortho_config(prefix = "BONVOYAGE")]
pub(crate) struct ImportArgs {
    /// Path to a JSON graph snapshot.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) graph_path: Option<Utf8PathBuf>,
    /// Path to the SQLite graph database; created when missing.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

/// Resolved `import` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImportConfig {
    pub(crate) graph_path: Utf8PathBuf,
    pub(crate) database: Utf8PathBuf,
}

impl TryFrom<ImportArgs> for ImportConfig {
    type Error = CliError;

    fn try_from(args: ImportArgs) -> Result<Self, Self::Error> {
        let graph_path = args.graph_path.ok_or(CliError::MissingArgument {
            field: ARG_IMPORT_GRAPH,
            env: ENV_IMPORT_GRAPH,
        })?;
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        Ok(Self {
            graph_path,
            database,
        })
    }
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ImportSummary {
    pub(crate) locations: usize,
    pub(crate) routes: usize,
    pub(crate) ratings: usize,
}

pub(crate) fn run_import(args: ImportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = ImportConfig::try_from(merged)?;
    let summary = execute_import(&config)?;
    write_json(writer, &summary)
}

pub(crate) fn execute_import(config: &ImportConfig) -> Result<ImportSummary, CliError> {
    require_existing(&config.graph_path, ARG_IMPORT_GRAPH)?;
    let snapshot: GraphSnapshot = load_json(&config.graph_path, "graph snapshot")?;
    persist_graph(&config.database, &snapshot).map_err(|source| CliError::PersistGraph {
        path: config.database.clone(),
        source,
    })?;
    let summary = ImportSummary {
        locations: snapshot.locations.len(),
        routes: snapshot.routes.len(),
        ratings: snapshot.ratings.len(),
    };
    info!(
        "imported {} locations, {} routes and {} ratings into {}",
        summary.locations, summary.routes, summary.ratings, config.database
    );
    Ok(summary)
}
