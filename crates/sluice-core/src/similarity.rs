//! Near-duplicate detection between evaluated candidates.
//!
//! Two candidates from different sources are folded when their metadata
//! does not contradict (resolution, codec, size) and their names overlap
//! strongly enough token-wise.

use std::collections::HashSet;

use crate::models::EvaluatedStream;

/// Token overlap at or above this ratio marks two names as the same release.
const SIMILARITY_THRESHOLD: f64 = 0.6;
/// Known sizes whose gap exceeds this share of their average are different files.
const SIZE_TOLERANCE: f64 = 0.1;
/// Tokens must be longer than this many characters to carry signal.
const MIN_TOKEN_CHARS: usize = 2;

/// Whether two evaluated candidates represent the same underlying release.
/// Symmetric in its arguments.
pub fn is_duplicate(a: &EvaluatedStream, b: &EvaluatedStream) -> bool {
    if let (Some(res_a), Some(res_b)) = (a.info.resolution, b.info.resolution) {
        if res_a != res_b {
            return false;
        }
    }
    if a.info.codec.is_known() && b.info.codec.is_known() && a.info.codec != b.info.codec {
        return false;
    }
    if let (Some(size_a), Some(size_b)) = (a.info.size_gb, b.info.size_gb) {
        if !is_similar_size(size_a, size_b) {
            return false;
        }
    }

    let tokens_a = tokenize(a.stream.display_name());
    let tokens_b = tokenize(b.stream.display_name());
    if tokens_a.is_empty() || tokens_b.is_empty() {
        // Not enough signal to call them the same.
        return false;
    }
    let overlap = tokens_a.intersection(&tokens_b).count();
    overlap as f64 / tokens_a.len().max(tokens_b.len()) as f64 >= SIMILARITY_THRESHOLD
}

/// Relative size gap, measured against the average of the two.
fn is_similar_size(a: f64, b: f64) -> bool {
    let avg = (a + b) / 2.0;
    if avg <= 0.0 {
        return false;
    }
    (a - b).abs() / avg <= SIZE_TOLERANCE
}

/// Split a display name into comparison tokens: lowercase, keep word,
/// hyphen and underscore characters, split on everything else (dots
/// included, since scene names delimit with them), drop short tokens.
fn tokenize(name: &str) -> HashSet<String> {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_owned)
        .collect()
}
