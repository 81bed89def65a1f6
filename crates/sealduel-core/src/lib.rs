//! Seal Duel Core - video identifier normalization and view-count comparison
//!
//! A student edits two constants on a classroom page (a video identifier and
//! its view count) and the page compares them against the Saxophone Seal.
//! This crate holds the logic the page, the CI harness, and the WebAssembly
//! binding all share.
//!
//! # Architecture
//!
//! ```text
//! page source → source::extract → DuelConfig
//!                                    ↓
//!        normalizer::normalize → VideoId | absent
//!                                    ↓
//!        comparison::compare + comparison::classify → Scoreboard
//!
//! page source → validator::validate_source → ValidationReport (CI)
//! ```
//!
//! # Guarantees
//!
//! - **Pure**: no I/O, no shared state, no clocks
//! - **Total**: malformed input degrades to an absent id, never a panic
//! - **Deterministic**: same input always produces identical output

pub mod comparison;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod scoreboard;
pub mod source;
pub mod validator;

pub use comparison::{classify, compare, format_count, ComparisonResult, MessageClassification};
pub use config::DuelConfig;
pub use error::{Error, Result};
pub use normalizer::{normalize, VideoId};
pub use scoreboard::Scoreboard;
pub use validator::{validate_source, ValidationReport};
