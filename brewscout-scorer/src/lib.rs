//! Classification, filtering and scoring for Brewscout candidates.
//!
//! The crate provides the two ranking stages of the discovery pipeline:
//! - **Hard filtering** removes candidates whose business type or name marks
//!   them as something other than a café (dessert shops, unrequested
//!   bakeries) and, for underrated searches, places with heavy review volume.
//!   See [`filter_candidates`].
//! - **Composite scoring** rates each survivor from its rating, review volume,
//!   category and how well its name, categories and reviews match the
//!   caller's include and exclude terms, then sorts and truncates. See
//!   [`ScoringEngine`].
//!
//! Both stages are pure: they take places by value and return new ones.
//!
//! # Examples
//!
//! ```
//! use brewscout_core::{Place, SearchPreferences};
//! use brewscout_scorer::{ScoringEngine, filter_candidates};
//!
//! let prefs = SearchPreferences::new("Ballard").with_include("wifi");
//! let candidates = vec![
//!     Place::builder("1", "Fremont Gelato").category("ice_cream_shop").build(),
//!     Place::builder("2", "Wifi Cafe").category("cafe").rating(4.2).build(),
//! ];
//! let survivors = filter_candidates(candidates, &prefs);
//! let ranked = ScoringEngine::default().rank(survivors, &prefs, 6);
//! assert_eq!(ranked.len(), 1);
//! assert!(ranked[0].score() > 0.0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod filter;
mod weights;


pub use engine::{ScoreBreakdown, ScoreOutcome, ScoringEngine, sort_by_rank};
pub use error::ScoringConfigError;
pub use filter::{
    BAKERY_TYPES, DESSERT_NAME_TOKENS, DISALLOWED_TYPES, DropReason, UNDERRATED_RATING_CEILING,
    drop_reason, filter_candidates,
};
pub use weights::{ReviewPolicy, ScoreWeights, ScoringConfig};
