//! Auto-pick: collapse the ranked list to a single recommendation.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::SourcePriority;
use crate::models::RankedStream;
use crate::rank::{annotate, RankOutcome};

/// Minimum score a ranked entry needs to be auto-pick eligible.
const ELIGIBLE_SCORE: u8 = 40;
/// Diagnostic entries surfaced when nothing is eligible.
const FALLBACK_LIMIT: usize = 3;

/// Prefix of the winner's display name.
const AUTO_PREFIX: &str = "▶ AUTO | ";
/// Prefix of diagnostic fallback entries.
const FALLBACK_PREFIX: &str = "❌ ";

/// Collapse a ranked outcome to one recommended stream, or to at most
/// three diagnostic entries when no candidate clears the bar.
pub fn auto_pick(outcome: &RankOutcome, priority: &SourcePriority) -> Vec<RankedStream> {
    let best = outcome
        .ranked
        .iter()
        .filter(|entry| entry.score >= ELIGIBLE_SCORE)
        .min_by(|a, b| tie_break(a, b));

    if let Some(best) = best {
        debug!(winner = %best.original_name, score = best.score, "auto-pick selected");
        let mut winner = best.clone();
        prefix_name(&mut winner, AUTO_PREFIX);
        return vec![winner];
    }

    // Nothing qualified: re-annotate the full evaluated set, non-playable
    // candidates included, and surface the top few as a diagnostic rather
    // than a confident pick.
    annotate(&outcome.evaluated, priority)
        .into_iter()
        .take(FALLBACK_LIMIT)
        .map(|mut entry| {
            prefix_name(&mut entry, FALLBACK_PREFIX);
            entry
        })
        .collect()
}

/// Sequential tie-break: score, then raw byte size (missing sorts last),
/// then codec preference, then source priority, then input order.
/// `Ordering::Less` means "preferred".
fn tie_break(a: &RankedStream, b: &RankedStream) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| {
            let size_a = a.size.unwrap_or(f64::INFINITY);
            let size_b = b.size.unwrap_or(f64::INFINITY);
            size_a.total_cmp(&size_b)
        })
        .then_with(|| a.codec.preference().cmp(&b.codec.preference()))
        .then_with(|| a.source_rank.cmp(&b.source_rank))
        .then_with(|| a.index.cmp(&b.index))
}

fn prefix_name(entry: &mut RankedStream, prefix: &str) {
    let name = format!("{prefix}{}", entry.stream.display_name());
    entry.stream.name = Some(name);
}
