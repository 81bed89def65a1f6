//! Video identifier normalizer — reduces raw input to a canonical 11-character id
//!
//! The raw value a student pastes into the page can be a bare id, an id with
//! trailing share parameters, or one of several URL shapes. The normalizer
//! anchors on literal marker substrings; it is not a URL parser and does not
//! check scheme, domain, or query-string syntax.
//!
//! # Shapes (tried in order)
//!
//! 1. `youtube.com/watch?v=<id>`
//! 2. `youtube.com/embed/<id>`
//! 3. `youtu.be/<id>`
//! 4. `<id>` at the start of the input, followed by `?`, `&`, or end of input
//!
//! The first shape that matches decides the result. Marker shapes only match
//! when exactly 11 id characters follow the marker, so a 12-character token
//! is rejected rather than truncated.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

/// Sentinel left in the page source until a student fills in their video
pub const PLACEHOLDER_ID: &str = "YOUR_ID_HERE";

/// Length of a canonical video id
pub const VIDEO_ID_LEN: usize = 11;

static CANONICAL_RE: OnceLock<Regex> = OnceLock::new();
static WATCH_RE: OnceLock<Regex> = OnceLock::new();
static EMBED_RE: OnceLock<Regex> = OnceLock::new();
static SHORT_LINK_RE: OnceLock<Regex> = OnceLock::new();
static BARE_WITH_PARAMS_RE: OnceLock<Regex> = OnceLock::new();

fn canonical_re() -> &'static Regex {
    CANONICAL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid canonical id regex pattern")
    })
}

fn watch_re() -> &'static Regex {
    WATCH_RE.get_or_init(|| {
        Regex::new(r"youtube\.com/watch\?v=([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)")
            .expect("Invalid watch regex pattern")
    })
}

fn embed_re() -> &'static Regex {
    EMBED_RE.get_or_init(|| {
        Regex::new(r"youtube\.com/embed/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)")
            .expect("Invalid embed regex pattern")
    })
}

fn short_link_re() -> &'static Regex {
    SHORT_LINK_RE.get_or_init(|| {
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)")
            .expect("Invalid short-link regex pattern")
    })
}

fn bare_with_params_re() -> &'static Regex {
    BARE_WITH_PARAMS_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_-]{11})(?:\?|&|$)").expect("Invalid bare id regex pattern")
    })
}

// ── Types ─────────────────────────────────────────────────

/// A canonical 11-character video identifier drawn from `[A-Za-z0-9_-]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Accept a string only if it is already in canonical shape.
    ///
    /// Unlike [`normalize`], no extraction is attempted.
    pub fn parse(raw: &str) -> Result<Self> {
        if is_canonical(raw) {
            Ok(VideoId(raw.to_string()))
        } else {
            Err(Error::InvalidVideoId {
                raw: raw.to_string(),
            })
        }
    }

    /// For ids known canonical at compile time
    pub(crate) fn new_unchecked(raw: &str) -> Self {
        debug_assert!(is_canonical(raw), "not a canonical id: {}", raw);
        VideoId(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Embeddable player URL for this video
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        VideoId::parse(s)
    }
}

impl TryFrom<String> for VideoId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if is_canonical(&value) {
            Ok(VideoId(value))
        } else {
            Err(Error::InvalidVideoId { raw: value })
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Which input shape produced a canonical id
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Input was already a bare canonical id
    Canonical,
    Watch,
    Embed,
    ShortLink,
    /// Bare id followed by `?` or `&` parameters
    BareWithParams,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Canonical => "canonical",
            Shape::Watch => "watch",
            Shape::Embed => "embed",
            Shape::ShortLink => "short-link",
            Shape::BareWithParams => "bare-with-params",
        };
        f.write_str(name)
    }
}

/// Example inputs for each accepted shape, for operator hints
pub const ACCEPTED_FORMATS: &[(&str, &str)] = &[
    ("Just the ID", "dQw4w9WgXcQ"),
    ("With params", "dQw4w9WgXcQ?si=abc123"),
    ("Watch URL", "https://youtube.com/watch?v=dQw4w9WgXcQ"),
    ("Embed URL", "https://youtube.com/embed/dQw4w9WgXcQ?si=abc123"),
    ("Short URL", "https://youtu.be/dQw4w9WgXcQ"),
];

// ── Public API ─────────────────────────────────────────────

/// Normalize raw input to a canonical video id.
///
/// Returns `None` (absent) for missing or empty input, the placeholder
/// sentinel, or input where no supported shape yields exactly 11 id
/// characters. Never panics on malformed input.
pub fn normalize(input: Option<&str>) -> Option<VideoId> {
    normalize_with_shape(input).map(|(id, _)| id)
}

/// Like [`normalize`], but also reports which shape matched
pub fn normalize_with_shape(input: Option<&str>) -> Option<(VideoId, Shape)> {
    let raw = match input {
        Some(raw) if !raw.is_empty() && !is_placeholder(raw) => raw,
        _ => {
            tracing::debug!("identifier absent or placeholder");
            return None;
        }
    };

    let trimmed = raw.trim();
    if is_canonical(trimmed) {
        tracing::debug!(shape = %Shape::Canonical, id = trimmed, "identifier already canonical");
        return Some((VideoId(trimmed.to_string()), Shape::Canonical));
    }

    let shapes: [(Shape, &Regex); 4] = [
        (Shape::Watch, watch_re()),
        (Shape::Embed, embed_re()),
        (Shape::ShortLink, short_link_re()),
        (Shape::BareWithParams, bare_with_params_re()),
    ];

    for (shape, pattern) in shapes {
        if let Some(id) = pattern.captures(trimmed).and_then(|caps| caps.get(1)) {
            tracing::debug!(shape = %shape, id = id.as_str(), "extracted identifier");
            return Some((VideoId(id.as_str().to_string()), shape));
        }
    }

    tracing::debug!(input = trimmed, "no identifier shape matched");
    None
}

/// True when the input is exactly 11 characters from `[A-Za-z0-9_-]`
pub fn is_canonical(input: &str) -> bool {
    canonical_re().is_match(input)
}

/// True when the input is the untouched placeholder sentinel
pub fn is_placeholder(input: &str) -> bool {
    input == PLACEHOLDER_ID
}
