//! Details command implementation for the Brewscout CLI.

use std::io::Write;

use brewscout_core::SearchResult;
use brewscout_scorer::ReviewPolicy;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::finder::{Connection, FinderBuilder};
use crate::search::write_result;
use crate::{
    ARG_API_KEY, ARG_BASE_URL, ARG_DETAILS_NAME, CliError, ENV_API_KEY, ENV_DETAILS_NAME,
    shared_api_key,
};

/// CLI arguments for the `details` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look up one café by name and print its address, rating, \
                 opening hours, recent reviews and photos.",
    about = "Describe one café in detail"
)]
#[ortho_config(prefix = "BREWSCOUT")]
pub(crate) struct DetailsArgs {
    /// Name of the café.
    #[arg(value_name = ARG_DETAILS_NAME)]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// Where the café is; defaults to the search default location.
    #[arg(long, value_name = "location")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Google Maps API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Override the Google Maps API base URL.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl DetailsArgs {
    pub(crate) fn into_config(self) -> Result<DetailsConfig, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.api_key = shared_api_key(merged.api_key);
        DetailsConfig::try_from(merged)
    }
}

/// Resolved `details` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DetailsConfig {
    pub(crate) name: String,
    /// Blank when the caller gave no location.
    pub(crate) location: String,
    pub(crate) connection: Connection,
}

impl TryFrom<DetailsArgs> for DetailsConfig {
    type Error = CliError;

    fn try_from(args: DetailsArgs) -> Result<Self, Self::Error> {
        let name = args
            .name
            .map(|raw| raw.trim().to_owned())
            .filter(|name| !name.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_DETAILS_NAME,
                env: ENV_DETAILS_NAME,
            })?;
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_API_KEY,
                env: ENV_API_KEY,
            })?;

        Ok(Self {
            name,
            location: args.location.unwrap_or_default(),
            connection: Connection {
                api_key,
                base_url: args.base_url,
            },
        })
    }
}

pub(crate) fn run_details_with(
    args: DetailsArgs,
    builder: &dyn FinderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let result = execute_details(&config, builder)?;
    write_result(writer, &result)
}

pub(crate) fn execute_details(
    config: &DetailsConfig,
    builder: &dyn FinderBuilder,
) -> Result<SearchResult, CliError> {
    let finder = builder.build(&config.connection, ReviewPolicy::default())?;
    Ok(finder.details(&config.name, &config.location))
}

#[cfg(test)]
pub(crate) fn details_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DetailsConfig, CliError> {
    let merged = DetailsArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DetailsConfig::try_from(merged)
}
