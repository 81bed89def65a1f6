//! Comparison calculator — bar shares, display percentages, and message classification
//!
//! Both operations are pure: the same counts always produce the same result,
//! and nothing is cached between calls.

use std::fmt;

/// Bar share used for each side when both counts are zero
const TIE_SHARE: f64 = 50.0;

/// Proportional split of two view counts
///
/// `*_share` is the bar width (0–100); `*_percent` is the independently
/// rounded label. When both counts are zero the bars tie at 50/50 while
/// both labels read 0.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ComparisonResult {
    pub subject_share: f64,
    pub reference_share: f64,
    pub subject_percent: u32,
    pub reference_percent: u32,
}

/// Compute bar shares and display percentages for two counts.
///
/// Rounded percentages are not corrected to sum to 100.
pub fn compare(subject_count: u64, reference_count: u64) -> ComparisonResult {
    let total = subject_count as u128 + reference_count as u128;
    if total == 0 {
        return ComparisonResult {
            subject_share: TIE_SHARE,
            reference_share: TIE_SHARE,
            subject_percent: 0,
            reference_percent: 0,
        };
    }

    let total = total as f64;
    let subject_share = subject_count as f64 / total * 100.0;
    let reference_share = reference_count as f64 / total * 100.0;

    ComparisonResult {
        subject_share,
        reference_share,
        subject_percent: subject_share.round() as u32,
        reference_percent: reference_share.round() as u32,
    }
}

/// Outcome of comparing the subject against the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageClassification {
    /// No valid subject identifier
    NoVideo,
    ZeroViews,
    /// ratio > 1
    SubjectWins,
    /// 0.5 < ratio ≤ 1
    StrongShowing,
    /// 0.1 < ratio ≤ 0.5
    ModerateShowing,
    /// ratio ≤ 0.1
    ReferenceDominant,
}

impl MessageClassification {
    pub const ALL: [MessageClassification; 6] = [
        MessageClassification::NoVideo,
        MessageClassification::ZeroViews,
        MessageClassification::SubjectWins,
        MessageClassification::StrongShowing,
        MessageClassification::ModerateShowing,
        MessageClassification::ReferenceDominant,
    ];

    /// Status message shown to the student
    pub fn message(self) -> &'static str {
        match self {
            MessageClassification::NoVideo => {
                "🎬 You haven't uploaded your video yet! Edit script.js to challenge the Seal!"
            }
            MessageClassification::ZeroViews => {
                "📊 Your video has 0 views? Update the view count in script.js!"
            }
            MessageClassification::SubjectWins => {
                "🏆 INCREDIBLE! Your favorite video has MORE views than the Saxophone Seal! You have great taste!"
            }
            MessageClassification::StrongShowing => {
                "🔥 Impressive! Your video is giving the Seal some serious competition!"
            }
            MessageClassification::ModerateShowing => {
                "💪 Not bad! Your video is putting up a good fight against the legend!"
            }
            MessageClassification::ReferenceDominant => {
                "🦭 The Saxophone Seal remains the undisputed champion... for now!"
            }
        }
    }

    /// Style tag attached to the status message; unique per classification
    pub fn style(self) -> &'static str {
        match self {
            MessageClassification::NoVideo => "text-yellow-300",
            MessageClassification::ZeroViews => "text-orange-300",
            MessageClassification::SubjectWins => "text-green-400",
            MessageClassification::StrongShowing => "text-blue-400",
            MessageClassification::ModerateShowing => "text-indigo-300",
            MessageClassification::ReferenceDominant => "text-purple-300",
        }
    }
}

impl fmt::Display for MessageClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageClassification::NoVideo => "no_video",
            MessageClassification::ZeroViews => "zero_views",
            MessageClassification::SubjectWins => "subject_wins",
            MessageClassification::StrongShowing => "strong_showing",
            MessageClassification::ModerateShowing => "moderate_showing",
            MessageClassification::ReferenceDominant => "reference_dominant",
        };
        f.write_str(name)
    }
}

/// Classify the subject's count against the reference.
///
/// A zero reference with a positive subject count classifies as
/// [`MessageClassification::SubjectWins`] (ratio taken as infinite).
pub fn classify(
    subject_count: u64,
    reference_count: u64,
    has_valid_identifier: bool,
) -> MessageClassification {
    if !has_valid_identifier {
        return MessageClassification::NoVideo;
    }
    if subject_count == 0 {
        return MessageClassification::ZeroViews;
    }
    if reference_count == 0 {
        tracing::warn!(subject_count, "zero reference count, treating ratio as infinite");
        return MessageClassification::SubjectWins;
    }

    // Thresholds compared exactly in integers; f64 loses precision past 2^53.
    let subject = subject_count as u128;
    let reference = reference_count as u128;
    if subject > reference {
        MessageClassification::SubjectWins
    } else if 2 * subject > reference {
        MessageClassification::StrongShowing
    } else if 10 * subject > reference {
        MessageClassification::ModerateShowing
    } else {
        MessageClassification::ReferenceDominant
    }
}

/// Format a count with `,` thousands separators (`8600000` → `8,600,000`)
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
