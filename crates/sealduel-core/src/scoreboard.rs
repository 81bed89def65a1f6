//! Scoreboard — everything the page needs to render one duel
//!
//! Bundles the normalized subject id, both comparisons, and the status
//! message into a single serializable view model. Building it is pure; the
//! page decides how and when to apply it.

use crate::comparison::{format_count, ComparisonResult, MessageClassification};
use crate::config::DuelConfig;
use crate::normalizer::VideoId;
use crate::Result;

/// Delay before the page animates the bars to their widths
pub const REVEAL_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Scoreboard {
    pub subject: Side,
    pub reference: Side,
    pub classification: MessageClassification,
    pub message: &'static str,
    pub style: &'static str,
    pub reveal_delay_ms: u64,
}

/// One half of the two-sided bar display
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Side {
    /// `None` means the page shows its placeholder notice
    pub video_id: Option<VideoId>,
    pub embed_url: Option<String>,
    pub views: u64,
    pub views_label: String,
    /// Bar width, 0–100
    pub bar_width: f64,
    pub percent_label: String,
}

impl Side {
    fn new(video_id: Option<VideoId>, views: u64, bar_width: f64, percent: u32) -> Self {
        Self {
            embed_url: video_id.as_ref().map(VideoId::embed_url),
            video_id,
            views,
            views_label: format_count(views),
            bar_width,
            percent_label: format!("{}%", percent),
        }
    }
}

impl Scoreboard {
    /// Build the view model for a configuration.
    ///
    /// # Errors
    /// `ZeroReference` when the configured reference count is zero.
    pub fn build(config: &DuelConfig) -> Result<Self> {
        config.validate()?;

        let subject_id = config.subject_id();
        let comparison: ComparisonResult = config.comparison();
        let classification = config.classification();

        tracing::debug!(
            has_video = subject_id.is_some(),
            %classification,
            subject_share = comparison.subject_share,
            "built scoreboard"
        );

        Ok(Self {
            subject: Side::new(
                subject_id,
                config.subject_views,
                comparison.subject_share,
                comparison.subject_percent,
            ),
            reference: Side::new(
                Some(config.reference_video.clone()),
                config.reference_views,
                comparison.reference_share,
                comparison.reference_percent,
            ),
            classification,
            message: classification.message(),
            style: classification.style(),
            reveal_delay_ms: REVEAL_DELAY_MS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_scoreboard_for_embed_submission() {
        let config = DuelConfig::with_subject(
            "https://www.youtube.com/embed/VlTo9Z94XQ0?si=bg3tArR73knMfnKP",
            8_600_000,
        );
        let board = Scoreboard::build(&config).unwrap();

        assert_eq!(
            board.subject.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/VlTo9Z94XQ0")
        );
        assert_eq!(board.subject.views_label, "8,600,000");
        assert_eq!(board.reference.views_label, "10,000,000");
        assert_eq!(board.subject.percent_label, "46%");
        assert_eq!(board.reference.percent_label, "54%");
        assert_eq!(board.classification, MessageClassification::StrongShowing);
        assert_eq!(board.style, "text-blue-400");
        assert_eq!(board.reveal_delay_ms, 500);
    }

    #[test]
    fn test_placeholder_submission_has_no_embed() {
        let board = Scoreboard::build(&DuelConfig::default()).unwrap();
        assert_eq!(board.subject.video_id, None);
        assert_eq!(board.subject.embed_url, None);
        assert_eq!(board.classification, MessageClassification::NoVideo);
        assert_eq!(board.style, "text-yellow-300");
        assert_eq!(board.subject.percent_label, "0%");
        assert_eq!(board.reference.percent_label, "100%");
    }

    #[test]
    fn test_zero_reference_is_rejected() {
        let config = DuelConfig {
            reference_views: 0,
            ..DuelConfig::default()
        };
        assert_eq!(Scoreboard::build(&config), Err(Error::ZeroReference));
    }

    #[test]
    fn test_scoreboard_json_shape() {
        let board = Scoreboard::build(&DuelConfig::with_subject("dQw4w9WgXcQ", 12_000_000)).unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["classification"], "subject_wins");
        assert_eq!(json["subject"]["video_id"], "dQw4w9WgXcQ");
        assert_eq!(json["reference"]["video_id"], "G6zPvkP5u6Q");
        assert_eq!(json["style"], "text-green-400");
    }
}
