//! Error types emitted by the Brewscout CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use brewscout_data::google::ProviderBuildError;
use brewscout_scorer::ScoringConfigError;
use thiserror::Error;

/// Errors emitted by the Brewscout CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// Constructing the Google Maps client failed.
    #[error("failed to build places provider for {base_url:?}: {source}")]
    BuildProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The scoring weights were rejected.
    #[error(transparent)]
    BuildScorer(#[from] ScoringConfigError),
    /// Serialising the search result failed.
    #[error("failed to serialise search result: {0}")]
    SerialiseResult(#[source] serde_json::Error),
    /// Writing the search result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
