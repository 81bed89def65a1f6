//! JavaScript bindings for the Seal Duel core
//!
//! Thin wrapper around `sealduel-core` compiled to WebAssembly.
//! ZERO logic here — the page calls these instead of its own copies.

use sealduel_core::config::DuelConfig;
use sealduel_core::source::view_count_from_f64;
use sealduel_core::{classify, compare, normalizer, Scoreboard};
use wasm_bindgen::prelude::*;

/// Reduce a raw id or URL to its canonical 11-character id.
///
/// @param input - raw id, watch/embed/short URL, or undefined
/// @returns the canonical id, or undefined when none can be extracted
#[wasm_bindgen(js_name = "normalizeVideoId")]
pub fn normalize_video_id(input: Option<String>) -> Option<String> {
    normalizer::normalize(input.as_deref()).map(String::from)
}

/// Compute bar shares and display percentages.
///
/// @returns JSON string: { subject_share, reference_share, subject_percent, reference_percent }
/// @throws Error if serialization fails
#[wasm_bindgen(js_name = "compareViews")]
pub fn compare_views(subject_views: f64, reference_views: f64) -> Result<String, JsError> {
    let result = compare(to_count(subject_views)?, to_count(reference_views)?);
    serde_json::to_string(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Classify the subject against the reference.
///
/// @returns JSON string: { classification, message, style }
#[wasm_bindgen(js_name = "classifyViews")]
pub fn classify_views(
    subject_views: f64,
    reference_views: f64,
    has_valid_video: bool,
) -> Result<String, JsError> {
    let class = classify(
        to_count(subject_views)?,
        to_count(reference_views)?,
        has_valid_video,
    );
    let output = serde_json::json!({
        "classification": class,
        "message": class.message(),
        "style": class.style(),
    });
    serde_json::to_string(&output)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Build the full scoreboard for a raw id and view count.
///
/// @param video - raw id or URL as written in the page
/// @param views - subject view count
/// @returns JSON string of the scoreboard view model
/// @throws Error if the count is not a non-negative integer
#[wasm_bindgen]
pub fn scoreboard(video: Option<String>, views: f64) -> Result<String, JsError> {
    let config = DuelConfig {
        subject_video: video,
        subject_views: to_count(views)?,
        ..DuelConfig::default()
    };
    let board = Scoreboard::build(&config).map_err(|e| JsError::new(&e.to_string()))?;
    serde_json::to_string(&board)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn to_count(value: f64) -> Result<u64, JsError> {
    view_count_from_f64(value).map_err(|e| JsError::new(&e.to_string()))
}
