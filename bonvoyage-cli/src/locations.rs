//! Locations command: catalogue listing and detail lookups.

use std::io::Write;

use bonvoyage_core::SqliteGraphStore;
use bonvoyage_suggest::{Catalogue, MediaConfig};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CATEGORY, ARG_DATABASE, ARG_LOCATION_ID, ARG_MEDIA_BASE_URL, CliError, DEFAULT_DATABASE,
    media_config, require_existing, write_json,
};

/// CLI arguments for the `locations` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "locations",
    about = "List locations by category, best rated first, or show one by id"
)]
#[ortho_config(prefix = "BONVOYAGE")]
pub(crate) struct LocationsArgs {
    /// Path to the SQLite graph database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Base URL that image paths are resolved against.
    #[arg(long = ARG_MEDIA_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) media_base_url: Option<String>,
    /// Only list locations tagged with this category.
    #[arg(long = ARG_CATEGORY, value_name = "name", conflicts_with = "id")]
    #[serde(default)]
    pub(crate) category: Option<String>,
    /// Show a single location instead of a listing.
    #[arg(long = ARG_LOCATION_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) id: Option<u64>,
}

/// What the `locations` command shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LocationsQuery {
    /// Every non-hub location, optionally restricted to a category.
    List { category: Option<String> },
    /// One location by identifier.
    Detail { id: u64 },
}

/// Resolved `locations` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocationsConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) media: MediaConfig,
    pub(crate) query: LocationsQuery,
}

impl TryFrom<LocationsArgs> for LocationsConfig {
    type Error = CliError;

    fn try_from(args: LocationsArgs) -> Result<Self, Self::Error> {
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        let media = media_config(args.media_base_url)?;
        let query = match args.id {
            Some(id) => LocationsQuery::Detail { id },
            None => LocationsQuery::List {
                category: args.category,
            },
        };
        Ok(Self {
            database,
            media,
            query,
        })
    }
}

pub(crate) fn run_locations(args: LocationsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = LocationsConfig::try_from(merged)?;
    execute_locations(&config, writer)
}

pub(crate) fn execute_locations(
    config: &LocationsConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    require_existing(&config.database, ARG_DATABASE)?;
    let store = SqliteGraphStore::open(config.database.as_std_path())?;
    let catalogue = Catalogue::new(store, config.media.clone());
    match &config.query {
        LocationsQuery::List { category } => {
            let views = catalogue.by_category(category.as_deref())?;
            info!("listed {} locations", views.len());
            write_json(writer, &views)
        }
        LocationsQuery::Detail { id } => {
            let view = catalogue.detail(*id)?;
            write_json(writer, &view)
        }
    }
}
