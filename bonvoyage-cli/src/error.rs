//! Error types emitted by the Bon Voyage CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use bonvoyage_core::{PersistGraphError, SqliteGraphStoreError};
use bonvoyage_suggest::SuggestError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Bon Voyage CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag or positional argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The media base URL is not an absolute URL.
    #[error("invalid media base URL {url:?}: {source}")]
    InvalidMediaUrl {
        /// Configured value.
        url: String,
        /// Source error from `url`.
        #[source]
        source: url::ParseError,
    },
    /// Opening a JSON input file failed.
    #[error("failed to open {what} at {path:?}: {source}")]
    OpenInput {
        /// Kind of input, e.g. `suggestion request`.
        what: &'static str,
        /// Input path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A JSON input file could not be decoded.
    #[error("failed to parse {what} JSON at {path:?}: {source}")]
    ParseInput {
        /// Kind of input, e.g. `suggestion request`.
        what: &'static str,
        /// Input path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Opening the graph database failed.
    #[error(transparent)]
    OpenStore(#[from] SqliteGraphStoreError),
    /// Writing the imported graph failed.
    #[error("failed to import graph into {path:?}: {source}")]
    PersistGraph {
        /// Database path.
        path: Utf8PathBuf,
        /// Source error from the graph writer.
        #[source]
        source: PersistGraphError,
    },
    /// The suggestion or catalogue query failed.
    #[error(transparent)]
    Suggest(#[from] SuggestError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
