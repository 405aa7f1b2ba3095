//! Composite scoring and ranking of filtered candidates.
//!
//! A place's score is the sum of independent contributions (rating, review
//! volume, category, preference matches, exclusions, multi-match and, under
//! the strict policy, aesthetic review mentions), floored at zero. Review
//! text counts as evidence only once it has been fetched.
#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::collections::BTreeSet;

use brewscout_core::{KeywordGroup, Place, SearchPreferences};

use crate::{ReviewPolicy, ScoringConfig, ScoringConfigError};

const CAFE_NAME_TOKENS: &[&str] = &["cafe", "café", "coffee", "espresso"];
const DEPRIORITISED_TYPES: &[&str] = &["restaurant", "meal_takeaway", "meal_delivery"];
const PRIMARY_AESTHETIC: &[&str] = &["cute", "aesthetic", "aesthetically", "instagrammable"];

/// Per-component view of a place's score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Rating contribution.
    pub base: f32,
    /// Review-volume confidence adjustment.
    pub volume: f32,
    /// Café boost less the restaurant penalty.
    pub category: f32,
    /// Include-group bonuses.
    pub preferences: f32,
    /// Exclude-group penalties, as a non-positive number.
    pub exclusions: f32,
    /// Bonus for matching several include groups.
    pub multi_match: f32,
    /// Aesthetic review bonus under [`ReviewPolicy::StrictAesthetic`].
    pub aesthetic: f32,
    /// Include groups with matching evidence.
    pub matched: BTreeSet<KeywordGroup>,
    /// Whether any exclude group matched.
    pub soft_excluded: bool,
}

impl ScoreBreakdown {
    /// Sum of all components, floored at zero.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the composite score is an additive sum"
    )]
    pub fn total(&self) -> f32 {
        let raw = self.base
            + self.volume
            + self.category
            + self.preferences
            + self.exclusions
            + self.multi_match
            + self.aesthetic;
        raw.max(0.0_f32)
    }
}

/// Result of scoring one place.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    /// The place is rankable.
    Ranked(ScoreBreakdown),
    /// The strict review policy rejected the place.
    Excluded,
}

/// Scores and ranks places according to a [`ScoringConfig`].
///
/// # Examples
/// ```
/// use brewscout_core::{Place, SearchPreferences};
/// use brewscout_scorer::ScoringEngine;
///
/// let engine = ScoringEngine::default();
/// let prefs = SearchPreferences::new("Ballard").with_include("coffee");
/// let places = vec![
///     Place::builder("a", "Quiet Tea House").rating(4.0).rating_count(50).build(),
///     Place::builder("b", "Ballard Coffee Works").rating(4.0).rating_count(50).build(),
/// ];
/// let ranked = engine.rank(places, &prefs, 1);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].id(), "b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Build an engine after validating `config`.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when the weights are invalid.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.weights.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `place` without changing it.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "score components are weighted counts"
    )]
    pub fn evaluate(&self, place: &Place, preferences: &SearchPreferences) -> ScoreOutcome {
        let weights = &self.config.weights;
        let review_text = place.review_text();
        let searchable = place.searchable_text(true);

        let aesthetic = match self.config.review_policy {
            ReviewPolicy::SoftPenalty => 0.0_f32,
            ReviewPolicy::StrictAesthetic => {
                let Some((primary, secondary)) = aesthetic_hits(&review_text) else {
                    log::debug!("excluding {}: no aesthetic mention in reviews", place.name());
                    return ScoreOutcome::Excluded;
                };
                f32::from(primary) * weights.aesthetic_primary_bonus
                    + f32::from(secondary) * weights.aesthetic_secondary_bonus
            }
        };

        let mut breakdown = ScoreBreakdown {
            base: place.rating().unwrap_or(weights.default_rating) * weights.rating_multiplier,
            volume: self.volume_adjustment(place.rating_count()),
            category: self.category_adjustment(place, preferences),
            aesthetic,
            ..ScoreBreakdown::default()
        };

        for group in preferences.include_groups() {
            if let Some(keyword) = group.first_match(&searchable) {
                breakdown.preferences += weights.include_bonus;
                if review_text.contains(keyword) {
                    breakdown.preferences += weights.include_review_bonus;
                }
                breakdown.matched.insert(group);
            }
        }

        for group in preferences.exclude_groups() {
            if let Some(keyword) = group.first_match(&searchable) {
                breakdown.exclusions -= if review_text.contains(keyword) {
                    weights.exclude_review_penalty
                } else {
                    weights.exclude_penalty
                };
                breakdown.soft_excluded = true;
            }
        }

        let extra_groups = breakdown.matched.len().saturating_sub(1);
        breakdown.multi_match =
            f32::from(u16::try_from(extra_groups).unwrap_or(u16::MAX)) * weights.multi_match_bonus;

        ScoreOutcome::Ranked(breakdown)
    }

    /// Score `place`, returning the scored copy or `None` when excluded.
    #[must_use]
    pub fn score_place(&self, place: Place, preferences: &SearchPreferences) -> Option<Place> {
        match self.evaluate(&place, preferences) {
            ScoreOutcome::Ranked(breakdown) => {
                let total = breakdown.total();
                Some(
                    place
                        .with_score(total)
                        .with_excluded(breakdown.soft_excluded)
                        .with_matched_preferences(breakdown.matched),
                )
            }
            ScoreOutcome::Excluded => None,
        }
    }

    /// Score every place, drop exclusions, sort best-first and keep `limit`.
    #[must_use]
    pub fn rank(
        &self,
        places: Vec<Place>,
        preferences: &SearchPreferences,
        limit: usize,
    ) -> Vec<Place> {
        let mut scored: Vec<Place> = places
            .into_iter()
            .filter_map(|place| self.score_place(place, preferences))
            .collect();
        sort_by_rank(&mut scored);
        scored.truncate(limit);
        scored
    }

    fn volume_adjustment(&self, rating_count: u32) -> f32 {
        let weights = &self.config.weights;
        match rating_count {
            101.. => weights.volume_bonus,
            0..10 => negate(weights.volume_penalty),
            _ => 0.0_f32,
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "boost and penalty combine additively"
    )]
    fn category_adjustment(&self, place: &Place, preferences: &SearchPreferences) -> f32 {
        let weights = &self.config.weights;
        let name = place.name().to_lowercase();
        let mut adjustment = 0.0_f32;
        if place.has_category("cafe") || CAFE_NAME_TOKENS.iter().any(|t| name.contains(t)) {
            adjustment += weights.cafe_boost;
        }
        if !preferences.wants_food() && DEPRIORITISED_TYPES.iter().any(|t| place.has_category(t))
        {
            adjustment -= weights.deprioritised_penalty;
        }
        adjustment
    }
}

#[expect(clippy::float_arithmetic, reason = "penalties are stored as magnitudes")]
fn negate(magnitude: f32) -> f32 {
    -magnitude
}

/// Count primary and secondary aesthetic keywords in fetched review text.
///
/// Returns `None` when reviews exist but mention none of them. Places without
/// review text pass with zero hits.
fn aesthetic_hits(review_text: &str) -> Option<(u16, u16)> {
    if review_text.trim().is_empty() {
        return Some((0, 0));
    }
    let (mut primary, mut secondary) = (0_u16, 0_u16);
    for keyword in KeywordGroup::Aesthetic.keywords() {
        if review_text.contains(keyword) {
            if PRIMARY_AESTHETIC.contains(keyword) {
                primary = primary.saturating_add(1);
            } else {
                secondary = secondary.saturating_add(1);
            }
        }
    }
    (primary > 0 || secondary > 0).then_some((primary, secondary))
}

/// Stable sort by `(score, rating, rating_count)`, all descending.
///
/// Places equal on all three keys keep their relative order.
pub fn sort_by_rank(places: &mut [Place]) {
    places.sort_by(rank_order);
}

fn rank_order(a: &Place, b: &Place) -> Ordering {
    b.score()
        .total_cmp(&a.score())
        .then_with(|| {
            b.rating()
                .unwrap_or(0.0_f32)
                .total_cmp(&a.rating().unwrap_or(0.0_f32))
        })
        .then_with(|| b.rating_count().cmp(&a.rating_count()))
}
