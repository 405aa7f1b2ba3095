//! Property-based tests for the discovery building blocks.
//!
//! # Invariants tested
//!
//! - **Fallback variants:** unique, never the raw text itself, and always
//!   prefixed by it.
//! - **De-duplication:** a candidate set holds each identifier once, in
//!   first-seen order, keeping the first record.
//! - **Name matching:** any best match satisfies the name predicate.

use std::collections::HashSet;

use brewscout_core::Place;
use brewscout_discovery::{CandidateSet, best_match, fallback_variants, name_matches};
use proptest::prelude::*;

const NAMES: &[&str] = &[
    "Storyville Coffee",
    "Analog Coffee",
    "Cafe Allegro",
    "Victrola",
    "Milstead & Co",
    "Espresso Vivace",
];

fn place_strategy() -> impl Strategy<Value = Place> {
    (0_u8..8, 0..NAMES.len(), proptest::option::of(0.0_f32..=5.0_f32)).prop_map(
        |(id, name_idx, rating)| {
            let name = NAMES.get(name_idx).copied().unwrap_or("Cafe");
            let builder = Place::builder(format!("p{id}"), name);
            match rating {
                Some(r) => builder.rating(r).build(),
                None => builder.build(),
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn fallback_variants_are_unique_and_prefixed(text in "[A-Za-z ]{1,20}") {
        let variants = fallback_variants(&text);
        let unique: HashSet<&String> = variants.iter().collect();
        prop_assert_eq!(unique.len(), variants.len());
        for variant in &variants {
            prop_assert!(variant.starts_with(text.as_str()));
            prop_assert_ne!(variant, &text);
        }
    }

    #[test]
    fn candidate_set_keeps_first_record_per_id(
        places in proptest::collection::vec(place_strategy(), 0..30)
    ) {
        let mut expected: Vec<Place> = Vec::new();
        for place in &places {
            if !expected.iter().any(|kept| kept.id() == place.id()) {
                expected.push(place.clone());
            }
        }

        let mut set = CandidateSet::new();
        let added = set.extend(places);
        prop_assert_eq!(added, expected.len());
        prop_assert_eq!(set.into_places(), expected);
    }

    #[test]
    fn best_match_satisfies_predicate(
        places in proptest::collection::vec(place_strategy(), 0..12),
        query_idx in 0..NAMES.len(),
    ) {
        let query = NAMES.get(query_idx).copied().unwrap_or("Cafe");
        let any_match = places.iter().any(|p| name_matches(p.name(), query));
        let best = best_match(places, query);
        prop_assert_eq!(best.is_some(), any_match);
        if let Some(place) = best {
            prop_assert!(name_matches(place.name(), query));
        }
    }
}
