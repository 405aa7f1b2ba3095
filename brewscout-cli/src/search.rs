//! Search command implementation for the Brewscout CLI.

use std::io::Write;

use brewscout_core::{SearchPreferences, SearchResult};
use brewscout_scorer::ReviewPolicy;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::finder::{Connection, FinderBuilder};
use crate::{ARG_API_KEY, ARG_BASE_URL, CliError, ENV_API_KEY, shared_api_key};

/// CLI arguments for the `search` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Search for cafés around a free-text location. Include and \
                 exclude terms steer ranking (wifi, outlets, quiet, pastries, \
                 aesthetic, ...). Repeat --name to look up specific cafés \
                 instead of running an open-ended search.",
    about = "Search for cafés around a location"
)]
#[ortho_config(prefix = "BREWSCOUT")]
pub(crate) struct SearchArgs {
    /// Where to search, e.g. "Ballard" or "Mission, San Francisco".
    #[arg(value_name = "location")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Preference the results should satisfy. Repeatable.
    #[arg(long = "include", value_name = "term")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) include: Vec<String>,
    /// Preference the results should avoid. Repeatable.
    #[arg(long = "exclude", value_name = "term")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) exclude: Vec<String>,
    /// Drop places with a very high review count.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) underrated: bool,
    /// Look up a specific café by name. Repeatable.
    #[arg(long = "name", value_name = "name")]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) name: Vec<String>,
    /// Exclude places whose reviews never mention an aesthetic.
    #[arg(long)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) strict_aesthetic: bool,
    /// Google Maps API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Override the Google Maps API base URL.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

impl SearchArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        merged.api_key = shared_api_key(merged.api_key);
        SearchConfig::try_from(merged)
    }
}

/// Resolved `search` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SearchConfig {
    /// What the caller is looking for. The location may be blank.
    pub(crate) preferences: SearchPreferences,
    /// How to reach the places service.
    pub(crate) connection: Connection,
    /// How reviews influence ranking.
    pub(crate) policy: ReviewPolicy,
}

impl TryFrom<SearchArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: SearchArgs) -> Result<Self, Self::Error> {
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_API_KEY,
                env: ENV_API_KEY,
            })?;

        let base = SearchPreferences::new(args.location.unwrap_or_default())
            .with_underrated(args.underrated);
        let with_includes = args
            .include
            .iter()
            .fold(base, |prefs, term| prefs.with_include(term));
        let with_excludes = args
            .exclude
            .iter()
            .fold(with_includes, |prefs, term| prefs.with_exclude(term));
        let preferences = args
            .name
            .into_iter()
            .fold(with_excludes, SearchPreferences::with_place_name);

        let policy = if args.strict_aesthetic {
            ReviewPolicy::StrictAesthetic
        } else {
            ReviewPolicy::SoftPenalty
        };

        Ok(Self {
            preferences,
            connection: Connection {
                api_key,
                base_url: args.base_url,
            },
            policy,
        })
    }
}

pub(crate) fn run_search_with(
    args: SearchArgs,
    builder: &dyn FinderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let result = execute_search(&config, builder)?;
    write_result(writer, &result)
}

pub(crate) fn execute_search(
    config: &SearchConfig,
    builder: &dyn FinderBuilder,
) -> Result<SearchResult, CliError> {
    let finder = builder.build(&config.connection, config.policy)?;
    Ok(finder.search(&config.preferences))
}

/// Print `result` as pretty JSON followed by a newline.
pub(crate) fn write_result(writer: &mut dyn Write, result: &SearchResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(result).map_err(CliError::SerialiseResult)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = SearchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
