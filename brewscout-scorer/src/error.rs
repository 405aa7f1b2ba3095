//! Error types raised while configuring the scoring engine.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when validating [`crate::ScoreWeights`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringConfigError {
    /// A weight was NaN or infinite.
    #[error("score weight {field} must be finite")]
    NonFiniteWeight {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A weight was negative. Penalties are stored as positive magnitudes.
    #[error("score weight {field} must not be negative, got {value}")]
    NegativeWeight {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// The rating assumed for unrated places lies outside `0.0..=5.0`.
    #[error("default rating must be between 0 and 5, got {value}")]
    DefaultRatingOutOfRange {
        /// Value supplied.
        value: f32,
    },
}
