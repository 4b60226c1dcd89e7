//! Suggest command implementation for the Bon Voyage CLI.

use std::io::Write;

use bonvoyage_core::SqliteGraphStore;
use bonvoyage_suggest::{MediaConfig, RouteSuggester, SuggestRequest, SuggestResponse};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_MEDIA_BASE_URL, ARG_SUGGEST_REQUEST, ARG_VIEWER, CliError,
    DEFAULT_DATABASE, ENV_SUGGEST_REQUEST, load_json, media_config, require_existing,
    write_json,
};

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "suggest",
    long_about = "Suggest a multi-day route for a trip request. The request is \
                 a JSON object with source, destination, budget, tier, \
                 start_date, end_date and category fields, as posted by the \
                 trip form.",
    about = "Suggest a route for a JSON trip request"
)]
#[ortho_config(prefix = "BONVOYAGE")]
pub(crate) struct SuggestArgs {
    /// Path to a JSON file containing the trip request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the SQLite graph database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Base URL that image paths are resolved against.
    #[arg(long = ARG_MEDIA_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) media_base_url: Option<String>,
    /// Username whose own ratings are attached to each stop.
    #[arg(long = ARG_VIEWER, value_name = "username")]
    #[serde(default)]
    pub(crate) viewer: Option<String>,
}

impl SuggestArgs {
    pub(crate) fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SuggestConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Path to the SQLite graph database.
    pub(crate) database: Utf8PathBuf,
    /// Media root for image URLs.
    pub(crate) media: MediaConfig,
    /// Optional viewing user.
    pub(crate) viewer: Option<String>,
}

impl SuggestConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SUGGEST_REQUEST)?;
        require_existing(&self.database, ARG_DATABASE)?;
        Ok(())
    }
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SUGGEST_REQUEST,
            env: ENV_SUGGEST_REQUEST,
        })?;
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        let media = media_config(args.media_base_url)?;
        let viewer = args.viewer.filter(|name| !name.is_empty());
        Ok(Self {
            request_path,
            database,
            media,
            viewer,
        })
    }
}

pub(crate) fn run_suggest(args: SuggestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let response = execute_suggest(&config)?;
    write_json(writer, &response)
}

pub(crate) fn execute_suggest(config: &SuggestConfig) -> Result<SuggestResponse, CliError> {
    let request = load_suggest_request(&config.request_path)?;
    let store = SqliteGraphStore::open(config.database.as_std_path())?;
    let suggester = RouteSuggester::new(store, config.media.clone());
    let response = suggester.suggest(&request, config.viewer.as_deref())?;
    info!(
        "suggested {} stops from {} into {}",
        response.route.len(),
        request.source,
        request.destination
    );
    Ok(response)
}

/// Loads a JSON-encoded [`SuggestRequest`] from disk.
pub(crate) fn load_suggest_request(path: &Utf8Path) -> Result<SuggestRequest, CliError> {
    load_json(path, "suggestion request")
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SuggestConfig, CliError> {
    let merged = SuggestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SuggestConfig::try_from(merged)
}
