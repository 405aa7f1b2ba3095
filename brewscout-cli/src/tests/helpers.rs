//! Stub finder wiring shared by the CLI tests.

use std::cell::RefCell;

use brewscout_core::test_support::{StubGeocoder, StubPlacesProvider, raw_place};
use brewscout_core::{Location, PlaceFinder};
use brewscout_discovery::DiscoveryEngine;
use brewscout_scorer::{ReviewPolicy, ScoringConfig, ScoringEngine};

use crate::CliError;
use crate::finder::{Connection, FinderBuilder};

/// Builds a discovery engine over canned Ballard data and records what it
/// was asked to build.
#[derive(Debug, Default)]
pub(super) struct StubFinderBuilder {
    pub(super) seen: RefCell<Option<(Connection, ReviewPolicy)>>,
}

impl FinderBuilder for StubFinderBuilder {
    fn build(
        &self,
        connection: &Connection,
        policy: ReviewPolicy,
    ) -> Result<Box<dyn PlaceFinder>, CliError> {
        self.seen.replace(Some((connection.clone(), policy)));
        let scoring = ScoringEngine::new(ScoringConfig::default().with_review_policy(policy))?;
        Ok(Box::new(DiscoveryEngine::new(
            ballard_geocoder(),
            ballard_provider(),
            scoring,
        )))
    }
}

fn ballard_geocoder() -> StubGeocoder {
    let ballard = Location::new(47.668, -122.384, "Ballard, Seattle, WA, USA");
    StubGeocoder::default()
        .with_result("Ballard", ballard)
        .with_result("Seattle, WA", Location::new(47.606, -122.332, "Seattle, WA, USA"))
}

fn ballard_provider() -> StubPlacesProvider {
    StubPlacesProvider::default()
        .with_type_results(
            "cafe",
            vec![
                raw_place("p1", "Ballard Coffee Works", 4.5, 300, &["cafe"]),
                raw_place("p2", "Frozen Delight", 4.8, 500, &["ice_cream_shop"]),
            ],
        )
        .with_keyword_results(
            "Storyville Coffee",
            vec![raw_place("s1", "Storyville Coffee", 4.6, 900, &["cafe"])],
        )
}
