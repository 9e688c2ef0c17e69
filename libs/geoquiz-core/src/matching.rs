//! Answer matching: fuzzy capital text comparison and click proximity.

use crate::types::Point;

/// How close (map units) a click must be to a city marker to count as a hit.
pub const CLICK_TOLERANCE: f64 = 30.0;

/// Normalize a capital answer for comparison: lowercase, trim, fold German
/// diacritics to ASCII, then fold the typed digraph variants, replace hyphens
/// with spaces, strip everything outside `[a-z0-9 ]` and collapse whitespace.
///
/// The single-character fold runs before the digraph fold so that "München",
/// "Munchen" and "Muenchen" all normalize to "munchen".
pub fn normalize_text(text: &str) -> String {
    let mut folded = text
        .to_lowercase()
        .trim()
        .replace('ü', "u")
        .replace('ö', "o")
        .replace('ä', "a")
        .replace('ß', "ss")
        .replace("ue", "u")
        .replace("oe", "o")
        .replace("ae", "a")
        .replace('-', " ");
    folded.retain(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ');
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare two capital answers for equality after normalization.
pub fn compare_text(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

/// Euclidean distance between two map points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Whether `click` lands strictly within `tolerance` of `target`.
pub fn is_near_point(click: Point, target: Point, tolerance: f64) -> bool {
    distance(click, target) < tolerance
}
