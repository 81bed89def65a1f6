//! Error types for the Seal Duel core
//!
//! Identifier normalization never fails: an unusable identifier is reported
//! as `None` from [`crate::normalizer::normalize`]. The variants below only
//! arise at the boundary, when reading the page source or building a
//! [`crate::config::DuelConfig`].

use thiserror::Error;

/// Seal Duel error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A required assignment could not be located in the page source
    #[error("Missing field: {field} not found in source")]
    MissingField { field: String },

    /// The view count text is not a non-negative integer
    #[error("Invalid view count: '{raw}' is not a non-negative integer")]
    InvalidViewCount { raw: String },

    /// A string that must already be canonical is not an 11-character id
    #[error("Invalid video id: '{raw}' is not an 11-character identifier")]
    InvalidVideoId { raw: String },

    /// The reference count must be positive for the ratio to be defined
    #[error("Reference view count must be greater than zero")]
    ZeroReference,
}

impl Error {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Error::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_view_count(raw: impl Into<String>) -> Self {
        Error::InvalidViewCount { raw: raw.into() }
    }
}

/// Result type alias for Seal Duel operations
pub type Result<T> = std::result::Result<T, Error>;
