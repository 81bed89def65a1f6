//! Page source reader — pulls the editable constants out of the page script
//!
//! The page stores its configuration as plain assignment statements:
//!
//! ```text
//! const studentVidID = "https://www.youtube.com/embed/VlTo9Z94XQ0?si=...";
//! const studentViewCount = 8_600_000;
//! ```
//!
//! This is a textual search, not a JavaScript parser. Assignments must start
//! their own line; commented-out lines are ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::DuelConfig;
use crate::normalizer::VideoId;
use crate::{Error, Result};

pub const SUBJECT_VIDEO_FIELD: &str = "studentVidID";
pub const SUBJECT_VIEWS_FIELD: &str = "studentViewCount";
pub const REFERENCE_VIDEO_FIELD: &str = "SEAL_VIDEO_ID";
pub const REFERENCE_VIEWS_FIELD: &str = "SEAL_VIEW_COUNT";

static SUBJECT_VIDEO_RE: OnceLock<Regex> = OnceLock::new();
static SUBJECT_VIEWS_RE: OnceLock<Regex> = OnceLock::new();
static REFERENCE_VIDEO_RE: OnceLock<Regex> = OnceLock::new();
static REFERENCE_VIEWS_RE: OnceLock<Regex> = OnceLock::new();

fn string_assignment(name: &str) -> Regex {
    let pattern = format!(
        r#"(?m)^[ \t]*(?:const|let|var)[ \t]+{}[ \t]*=[ \t]*["']([^"'\r\n]+)["']"#,
        regex::escape(name)
    );
    Regex::new(&pattern).expect("Invalid string assignment regex pattern")
}

fn number_assignment(name: &str) -> Regex {
    let pattern = format!(
        r"(?m)^[ \t]*(?:const|let|var)[ \t]+{}[ \t]*=[ \t]*([^;\r\n]+)",
        regex::escape(name)
    );
    Regex::new(&pattern).expect("Invalid number assignment regex pattern")
}

fn subject_video_re() -> &'static Regex {
    SUBJECT_VIDEO_RE.get_or_init(|| string_assignment(SUBJECT_VIDEO_FIELD))
}

fn subject_views_re() -> &'static Regex {
    SUBJECT_VIEWS_RE.get_or_init(|| number_assignment(SUBJECT_VIEWS_FIELD))
}

fn reference_video_re() -> &'static Regex {
    REFERENCE_VIDEO_RE.get_or_init(|| string_assignment(REFERENCE_VIDEO_FIELD))
}

fn reference_views_re() -> &'static Regex {
    REFERENCE_VIEWS_RE.get_or_init(|| number_assignment(REFERENCE_VIEWS_FIELD))
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_trailing_comment(m.as_str()))
}

fn strip_trailing_comment(value: &str) -> &str {
    match value.find("//") {
        Some(idx) => value[..idx].trim(),
        None => value.trim(),
    }
}

// ── Raw field access ──────────────────────────────────────

/// Raw `studentVidID` string, or `None` when missing or empty
pub fn raw_subject_video(text: &str) -> Option<&str> {
    subject_video_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Raw right-hand side of `studentViewCount`, up to `;` or end of line
pub fn raw_subject_views(text: &str) -> Option<&str> {
    capture(subject_views_re(), text).filter(|raw| !raw.is_empty())
}

/// Raw `SEAL_VIDEO_ID` string, if the page overrides the reference video
pub fn raw_reference_video(text: &str) -> Option<&str> {
    reference_video_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Raw right-hand side of `SEAL_VIEW_COUNT`, if the page overrides it
pub fn raw_reference_views(text: &str) -> Option<&str> {
    capture(reference_views_re(), text).filter(|raw| !raw.is_empty())
}

/// Parse a view count, ignoring `_` and `,` grouping separators.
///
/// After separators are removed the value must match `^[0-9]+$` and fit in
/// a `u64`.
pub fn parse_view_count(raw: &str) -> Result<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_view_count(raw));
    }
    digits
        .parse::<u64>()
        .map_err(|_| Error::invalid_view_count(raw))
}

/// Accept a floating-point count only when it is a whole number in `u64` range.
///
/// JavaScript numbers arrive as `f64`; `2^64` itself is out of range.
pub fn view_count_from_f64(value: f64) -> Result<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(Error::invalid_view_count(value.to_string()))
    }
}

// ── Extraction ────────────────────────────────────────────

/// Build a [`DuelConfig`] from page source.
///
/// Both subject assignments are required. `SEAL_VIDEO_ID` and
/// `SEAL_VIEW_COUNT` override the reference when present. The subject id is
/// kept raw; normalization happens when the config is used.
///
/// # Errors
/// `MissingField` when a subject assignment is absent, `InvalidViewCount`
/// for an unparseable count, `InvalidVideoId` for a non-canonical
/// reference id.
pub fn extract(text: &str) -> Result<DuelConfig> {
    let video = raw_subject_video(text).ok_or_else(|| Error::missing_field(SUBJECT_VIDEO_FIELD))?;
    let views_raw = raw_subject_views(text).ok_or_else(|| Error::missing_field(SUBJECT_VIEWS_FIELD))?;
    let views = parse_view_count(views_raw)?;

    let mut config = DuelConfig::with_subject(video, views);

    if let Some(raw) = raw_reference_video(text) {
        config.reference_video = VideoId::parse(raw)?;
    }
    if let Some(raw) = raw_reference_views(text) {
        config.reference_views = parse_view_count(raw)?;
    }

    tracing::debug!(
        subject_views = config.subject_views,
        reference_views = config.reference_views,
        reference_video = %config.reference_video,
        "extracted duel config from source"
    );

    Ok(config)
}
