//! Command-line interface for the Bon Voyage planner.
//!
//! Three subcommands share one SQLite graph database:
//! - `suggest` answers a JSON route-suggestion request,
//! - `locations` browses the catalogue by category or identifier,
//! - `import` seeds the database from a JSON graph snapshot.
//!
//! Every option can come from CLI flags, configuration files or environment
//! variables prefixed with `BONVOYAGE_`.
#![forbid(unsafe_code)]

use std::io::{BufReader, Write};

use bonvoyage_suggest::MediaConfig;
use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::{Serialize, de::DeserializeOwned};

mod error;
mod fs;
mod import;
mod locations;
mod suggest;

pub use error::CliError;

use import::{ImportArgs, run_import};
use locations::{LocationsArgs, run_locations};
use suggest::{SuggestArgs, run_suggest};

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_MEDIA_BASE_URL: &str = "media-base-url";
pub(crate) const ARG_VIEWER: &str = "viewer";
pub(crate) const ARG_CATEGORY: &str = "category";
pub(crate) const ARG_LOCATION_ID: &str = "id";
pub(crate) const ARG_SUGGEST_REQUEST: &str = "request";
pub(crate) const ARG_IMPORT_GRAPH: &str = "graph";
pub(crate) const ENV_SUGGEST_REQUEST: &str = "BONVOYAGE_CMDS_SUGGEST_REQUEST_PATH";
pub(crate) const ENV_IMPORT_GRAPH: &str = "BONVOYAGE_CMDS_IMPORT_GRAPH_PATH";

/// Database used when none is configured.
pub(crate) const DEFAULT_DATABASE: &str = "bonvoyage.db";
/// Media root used when none is configured.
pub(crate) const DEFAULT_MEDIA_BASE_URL: &str = "http://localhost:8000/media/";

/// Run the Bon Voyage CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration, the store or
/// the requested command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Suggest(args) => run_suggest(args, &mut stdout),
        Command::Locations(args) => run_locations(args, &mut stdout),
        Command::Import(args) => run_import(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bonvoyage",
    about = "Plan multi-day trips through the Bon Voyage location graph",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Suggest a route for a JSON trip request.
    Suggest(SuggestArgs),
    /// List locations by category or show one by id.
    Locations(LocationsArgs),
    /// Import a JSON graph snapshot into the database.
    Import(ImportArgs),
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse the configured media root, falling back to the default.
pub(crate) fn media_config(raw: Option<String>) -> Result<MediaConfig, CliError> {
    let url = raw.unwrap_or_else(|| DEFAULT_MEDIA_BASE_URL.to_owned());
    MediaConfig::parse(&url).map_err(|source| CliError::InvalidMediaUrl { url, source })
}

/// Decode a JSON document from disk.
pub(crate) fn load_json<T>(path: &Utf8Path, what: &'static str) -> Result<T, CliError>
where
    T: DeserializeOwned,
{
    let file = fs::open_utf8_file(path).map_err(|source| CliError::OpenInput {
        what,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseInput {
        what,
        path: path.to_path_buf(),
        source,
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
