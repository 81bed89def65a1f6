//! Duel configuration — the editable subject values plus the fixed reference
//!
//! The page keeps these as literal constants; here they are an explicit
//! value passed into the core instead of process-wide state.

use crate::comparison::{classify, compare, ComparisonResult, MessageClassification};
use crate::normalizer::{self, VideoId, PLACEHOLDER_ID};
use crate::{Error, Result};

/// Reference video (the Saxophone Seal)
pub const REFERENCE_VIDEO_ID: &str = "G6zPvkP5u6Q";

/// Reference view count
pub const REFERENCE_VIEW_COUNT: u64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DuelConfig {
    /// Raw identifier as typed by the student; normalized on use
    pub subject_video: Option<String>,
    pub subject_views: u64,
    pub reference_video: VideoId,
    pub reference_views: u64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            subject_video: Some(PLACEHOLDER_ID.to_string()),
            subject_views: 0,
            reference_video: VideoId::new_unchecked(REFERENCE_VIDEO_ID),
            reference_views: REFERENCE_VIEW_COUNT,
        }
    }
}

impl DuelConfig {
    /// Configuration for a subject against the default reference
    pub fn with_subject(video: impl Into<String>, views: u64) -> Self {
        Self {
            subject_video: Some(video.into()),
            subject_views: views,
            ..Self::default()
        }
    }

    /// Reject configurations whose ratio would be undefined
    pub fn validate(&self) -> Result<()> {
        if self.reference_views == 0 {
            return Err(Error::ZeroReference);
        }
        Ok(())
    }

    /// Canonical subject id, or `None` when absent
    pub fn subject_id(&self) -> Option<VideoId> {
        normalizer::normalize(self.subject_video.as_deref())
    }

    pub fn comparison(&self) -> ComparisonResult {
        compare(self.subject_views, self.reference_views)
    }

    pub fn classification(&self) -> MessageClassification {
        classify(
            self.subject_views,
            self.reference_views,
            self.subject_id().is_some(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unfilled_placeholder() {
        let config = DuelConfig::default();
        assert_eq!(config.subject_video.as_deref(), Some(PLACEHOLDER_ID));
        assert_eq!(config.subject_id(), None);
        assert_eq!(config.reference_video.as_str(), REFERENCE_VIDEO_ID);
        assert_eq!(config.reference_views, REFERENCE_VIEW_COUNT);
        assert_eq!(config.classification(), MessageClassification::NoVideo);
    }

    #[test]
    fn test_with_subject_scenario() {
        let config = DuelConfig::with_subject(
            "https://www.youtube.com/embed/VlTo9Z94XQ0?si=bg3tArR73knMfnKP",
            8_600_000,
        );
        assert_eq!(config.subject_id().unwrap().as_str(), "VlTo9Z94XQ0");
        assert_eq!(config.classification(), MessageClassification::StrongShowing);
        let result = config.comparison();
        assert_eq!((result.subject_percent, result.reference_percent), (46, 54));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_reference_rejected() {
        let config = DuelConfig {
            reference_views: 0,
            ..DuelConfig::with_subject("dQw4w9WgXcQ", 10)
        };
        assert_eq!(config.validate(), Err(Error::ZeroReference));
    }
}
