//! Construction of the place finder backing each command.

use std::sync::Arc;

use brewscout_core::PlaceFinder;
use brewscout_data::google::{DEFAULT_BASE_URL, GoogleMapsClient, GoogleMapsConfig};
use brewscout_discovery::DiscoveryEngine;
use brewscout_scorer::{ReviewPolicy, ScoringConfig, ScoringEngine};

use crate::CliError;

/// Credentials and endpoint for the places service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Connection {
    pub(crate) api_key: String,
    pub(crate) base_url: Option<String>,
}

/// Builds a finder for the current invocation.
pub(crate) trait FinderBuilder {
    fn build(
        &self,
        connection: &Connection,
        policy: ReviewPolicy,
    ) -> Result<Box<dyn PlaceFinder>, CliError>;
}

/// Builds a [`DiscoveryEngine`] over the Google Maps web services.
pub(crate) struct GoogleFinderBuilder;

impl FinderBuilder for GoogleFinderBuilder {
    fn build(
        &self,
        connection: &Connection,
        policy: ReviewPolicy,
    ) -> Result<Box<dyn PlaceFinder>, CliError> {
        let base_url = connection
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let config = GoogleMapsConfig::new(connection.api_key.clone()).with_base_url(base_url.clone());
        let client = GoogleMapsClient::with_config(config)
            .map(Arc::new)
            .map_err(|source| CliError::BuildProvider { base_url, source })?;
        let scoring = ScoringEngine::new(ScoringConfig::default().with_review_policy(policy))?;
        Ok(Box::new(DiscoveryEngine::new(
            Arc::clone(&client),
            client,
            scoring,
        )))
    }
}
