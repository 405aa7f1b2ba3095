//! Tunable scoring constants and the review policy flag.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::ScoringConfigError;

/// Additive score contributions.
///
/// Penalties are stored as positive magnitudes and subtracted by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Multiplier applied to the 0–5 rating.
    pub rating_multiplier: f32,
    /// Rating assumed when a place has none.
    pub default_rating: f32,
    /// Bonus when more than 100 people rated the place.
    pub volume_bonus: f32,
    /// Penalty when fewer than 10 people rated the place.
    pub volume_penalty: f32,
    /// Bonus for cafés and coffee-named places.
    pub cafe_boost: f32,
    /// Penalty for restaurant-like places when food was not requested.
    pub deprioritised_penalty: f32,
    /// Bonus per include group with a matching keyword.
    pub include_bonus: f32,
    /// Extra bonus when that keyword also appears in reviews.
    pub include_review_bonus: f32,
    /// Penalty per exclude group with a matching keyword.
    pub exclude_penalty: f32,
    /// Penalty used instead when the keyword appears in reviews.
    pub exclude_review_penalty: f32,
    /// Bonus per matched include group beyond the first.
    pub multi_match_bonus: f32,
    /// Bonus per primary aesthetic keyword in reviews under the strict policy.
    pub aesthetic_primary_bonus: f32,
    /// Bonus per other aesthetic keyword in reviews under the strict policy.
    pub aesthetic_secondary_bonus: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rating_multiplier: 20.0_f32,
            default_rating: 2.5_f32,
            volume_bonus: 10.0_f32,
            volume_penalty: 5.0_f32,
            cafe_boost: 25.0_f32,
            deprioritised_penalty: 10.0_f32,
            include_bonus: 15.0_f32,
            include_review_bonus: 10.0_f32,
            exclude_penalty: 20.0_f32,
            exclude_review_penalty: 30.0_f32,
            multi_match_bonus: 5.0_f32,
            aesthetic_primary_bonus: 30.0_f32,
            aesthetic_secondary_bonus: 15.0_f32,
        }
    }
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when any value is non-finite or
    /// negative, or when the default rating lies outside `0.0..=5.0`.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ScoringConfigError::NonFiniteWeight { field });
            }
            if value < 0.0_f32 {
                return Err(ScoringConfigError::NegativeWeight { field, value });
            }
        }
        if !(0.0_f32..=5.0_f32).contains(&self.default_rating) {
            return Err(ScoringConfigError::DefaultRatingOutOfRange {
                value: self.default_rating,
            });
        }
        Ok(self)
    }

    const fn fields(&self) -> [(&'static str, f32); 13] {
        [
            ("rating_multiplier", self.rating_multiplier),
            ("default_rating", self.default_rating),
            ("volume_bonus", self.volume_bonus),
            ("volume_penalty", self.volume_penalty),
            ("cafe_boost", self.cafe_boost),
            ("deprioritised_penalty", self.deprioritised_penalty),
            ("include_bonus", self.include_bonus),
            ("include_review_bonus", self.include_review_bonus),
            ("exclude_penalty", self.exclude_penalty),
            ("exclude_review_penalty", self.exclude_review_penalty),
            ("multi_match_bonus", self.multi_match_bonus),
            ("aesthetic_primary_bonus", self.aesthetic_primary_bonus),
            ("aesthetic_secondary_bonus", self.aesthetic_secondary_bonus),
        ]
    }
}

/// How review text influences ranking.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewPolicy {
    /// Reviews only add bonuses and penalties; scores are floored at zero.
    #[default]
    SoftPenalty,
    /// Places whose fetched reviews never mention an aesthetic keyword are
    /// excluded outright; mentions earn large bonuses.
    StrictAesthetic,
}

/// Complete scoring configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score contributions.
    pub weights: ScoreWeights,
    /// Review policy.
    pub review_policy: ReviewPolicy,
}

impl ScoringConfig {
    /// Use `policy` for review handling.
    #[must_use]
    pub const fn with_review_policy(mut self, policy: ReviewPolicy) -> Self {
        self.review_policy = policy;
        self
    }

    /// Use `weights` for score contributions.
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}
