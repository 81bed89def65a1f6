//! Submission validator — checks the edited page constants before deployment
//!
//! Runs in CI against the page script. Like a compiler front end it
//! accumulates every diagnostic instead of stopping at the first, so a
//! student sees all problems in one run.
//!
//! # Checks
//!
//! 1. **Video id** — `studentVidID` exists, is not the placeholder, and
//!    normalizes to an 11-character id
//! 2. **View count** — `studentViewCount` exists and is a non-negative integer
//! 3. **Reference overrides** — when present, `SEAL_VIDEO_ID` is canonical and
//!    `SEAL_VIEW_COUNT` is a positive integer

use crate::normalizer::{self, Shape, VideoId};
use crate::source::{
    self, REFERENCE_VIDEO_FIELD, REFERENCE_VIEWS_FIELD, SUBJECT_VIDEO_FIELD, SUBJECT_VIEWS_FIELD,
};

// ── Report Types ──────────────────────────────────────────

/// Outcome of validating a page source
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Raw `studentVidID` value, if found
    pub raw_video: Option<String>,
    pub video_id: Option<VideoId>,
    pub shape: Option<Shape>,
    /// Raw `studentViewCount` text, if found
    pub raw_views: Option<String>,
    pub view_count: Option<u64>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            raw_video: None,
            video_id: None,
            shape: None,
            raw_views: None,
            view_count: None,
        }
    }

    /// True when no error-level diagnostics were recorded
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    fn add_error(&mut self, kind: DiagnosticKind, field: &str, message: String) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            kind,
            field: field.to_string(),
            message,
        });
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{} [{}] {}: {}", prefix, self.kind, self.field, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Category of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingField,
    PlaceholderId,
    InvalidVideoId,
    InvalidViewCount,
    InvalidReferenceVideo,
    ZeroReference,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::MissingField => "missing_field",
            DiagnosticKind::PlaceholderId => "placeholder_id",
            DiagnosticKind::InvalidVideoId => "invalid_video_id",
            DiagnosticKind::InvalidViewCount => "invalid_view_count",
            DiagnosticKind::InvalidReferenceVideo => "invalid_reference_video",
            DiagnosticKind::ZeroReference => "zero_reference",
        };
        f.write_str(name)
    }
}

// ── Public API ────────────────────────────────────────────

/// Validate the editable constants and any reference overrides in a page source
pub fn validate_source(text: &str) -> ValidationReport {
    let mut report = ValidationReport::new();
    check_video(text, &mut report);
    check_view_count(text, &mut report);
    check_reference(text, &mut report);

    tracing::debug!(
        valid = report.is_valid(),
        errors = report.errors().len(),
        "validated submission"
    );
    report
}

// ── Checks ────────────────────────────────────────────────

fn check_video(text: &str, report: &mut ValidationReport) {
    let Some(raw) = source::raw_subject_video(text) else {
        report.add_error(
            DiagnosticKind::MissingField,
            SUBJECT_VIDEO_FIELD,
            format!("{} not found or empty", SUBJECT_VIDEO_FIELD),
        );
        return;
    };
    report.raw_video = Some(raw.to_string());

    if normalizer::is_placeholder(raw) {
        report.add_error(
            DiagnosticKind::PlaceholderId,
            SUBJECT_VIDEO_FIELD,
            format!(
                "{} is still set to placeholder '{}'",
                SUBJECT_VIDEO_FIELD,
                normalizer::PLACEHOLDER_ID
            ),
        );
        return;
    }

    match normalizer::normalize_with_shape(Some(raw)) {
        Some((id, shape)) => {
            report.video_id = Some(id);
            report.shape = Some(shape);
        }
        None => report.add_error(
            DiagnosticKind::InvalidVideoId,
            SUBJECT_VIDEO_FIELD,
            format!("could not extract a valid 11-character id from '{}'", raw),
        ),
    }
}

fn check_view_count(text: &str, report: &mut ValidationReport) {
    let Some(raw) = source::raw_subject_views(text) else {
        report.add_error(
            DiagnosticKind::MissingField,
            SUBJECT_VIEWS_FIELD,
            format!("{} not found", SUBJECT_VIEWS_FIELD),
        );
        return;
    };
    report.raw_views = Some(raw.to_string());

    match source::parse_view_count(raw) {
        Ok(count) => report.view_count = Some(count),
        Err(err) => report.add_error(
            DiagnosticKind::InvalidViewCount,
            SUBJECT_VIEWS_FIELD,
            err.to_string(),
        ),
    }
}

fn check_reference(text: &str, report: &mut ValidationReport) {
    if let Some(raw) = source::raw_reference_video(text) {
        if let Err(err) = VideoId::parse(raw) {
            report.add_error(
                DiagnosticKind::InvalidReferenceVideo,
                REFERENCE_VIDEO_FIELD,
                err.to_string(),
            );
        }
    }

    if let Some(raw) = source::raw_reference_views(text) {
        match source::parse_view_count(raw) {
            Ok(0) => report.add_error(
                DiagnosticKind::ZeroReference,
                REFERENCE_VIEWS_FIELD,
                format!("{} must be greater than zero", REFERENCE_VIEWS_FIELD),
            ),
            Ok(_) => {}
            Err(err) => report.add_error(
                DiagnosticKind::InvalidViewCount,
                REFERENCE_VIEWS_FIELD,
                err.to_string(),
            ),
        }
    }
}
