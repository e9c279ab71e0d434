//! The ranking pipeline: normalize, evaluate, deduplicate, annotate, sort.

use tracing::debug;

use sluice_parse::MediaExtractor;

use crate::config::SourcePriority;
use crate::evaluate::{evaluate, Warning};
use crate::models::{EvaluatedStream, RankedStream, RawStream};
use crate::profile::Profile;
use crate::similarity::is_duplicate;

/// Score tiers for the display-name badge.
const STAR_SCORE: u8 = 80;
const CAUTION_SCORE: u8 = 40;

/// Score-tier indicator baked into display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Star,
    Caution,
    Fail,
}

impl Badge {
    pub fn for_score(score: u8) -> Self {
        if score >= STAR_SCORE {
            Self::Star
        } else if score >= CAUTION_SCORE {
            Self::Caution
        } else {
            Self::Fail
        }
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Star => write!(f, "⭐"),
            Self::Caution => write!(f, "⚠️"),
            Self::Fail => write!(f, "❌"),
        }
    }
}

/// Result of ranking one request's candidate set.
#[derive(Debug, Clone)]
pub struct RankOutcome {
    /// Playable, deduplicated, annotated, sorted.
    pub ranked: Vec<RankedStream>,
    /// Every evaluated candidate in input order, non-playable included.
    /// The auto-pick diagnostic fallback draws from this.
    pub evaluated: Vec<EvaluatedStream>,
}

/// Run the full pipeline over the combined candidate list of one request.
pub fn rank(
    streams: Vec<RawStream>,
    profile: &Profile,
    extractor: &dyn MediaExtractor,
    priority: &SourcePriority,
) -> RankOutcome {
    let evaluated: Vec<EvaluatedStream> = streams
        .into_iter()
        .enumerate()
        .map(|(index, mut stream)| {
            stream.normalize();
            let info = extractor.extract(stream.display_name(), stream.title.as_deref(), stream.size);
            let verdict = evaluate(&info, profile);
            EvaluatedStream {
                stream,
                info,
                verdict,
                index,
            }
        })
        .collect();

    // Greedy fold: each playable candidate joins the FIRST already-accepted
    // group it duplicates, in evaluated order. First match, not best match.
    let mut groups: Vec<EvaluatedStream> = Vec::new();
    for entry in evaluated.iter().filter(|e| e.verdict.playable) {
        match groups.iter_mut().find(|group| is_duplicate(group, entry)) {
            Some(group) => merge(group, entry),
            None => groups.push(entry.clone()),
        }
    }
    debug!(
        candidates = evaluated.len(),
        groups = groups.len(),
        profile = %profile.name,
        "ranked candidate set"
    );

    RankOutcome {
        ranked: annotate(&groups, priority),
        evaluated,
    }
}

/// Fold `entry` into `group`: the higher score keeps its data and display
/// identity (ties keep the incumbent), warnings become the ordered union.
fn merge(group: &mut EvaluatedStream, entry: &EvaluatedStream) {
    debug!(
        kept = %group.stream.display_name(),
        folded = %entry.stream.display_name(),
        "merging duplicate candidates"
    );
    let warnings = merge_warnings(&group.verdict.warnings, &entry.verdict.warnings);
    if entry.verdict.score > group.verdict.score {
        *group = entry.clone();
    }
    group.verdict.warnings = warnings;
}

/// Union of two warning lists: base order first, duplicates collapsed.
fn merge_warnings(base: &[Warning], other: &[Warning]) -> Vec<Warning> {
    let mut merged = base.to_vec();
    for warning in other {
        if !merged.contains(warning) {
            merged.push(*warning);
        }
    }
    merged
}

/// Annotate evaluated candidates with their final display name and sort:
/// score descending, ties by original index ascending. Shared by the main
/// pipeline and the auto-pick diagnostic fallback.
pub fn annotate(entries: &[EvaluatedStream], priority: &SourcePriority) -> Vec<RankedStream> {
    let mut ranked: Vec<RankedStream> = entries
        .iter()
        .map(|entry| annotate_entry(entry, priority))
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.index.cmp(&b.index)));
    ranked
}

fn annotate_entry(entry: &EvaluatedStream, priority: &SourcePriority) -> RankedStream {
    let original_name = entry.stream.display_name().to_string();
    let score = entry.verdict.score;

    let warning_text = if entry.verdict.warnings.is_empty() {
        String::new()
    } else {
        let joined = entry
            .verdict
            .warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" • ");
        format!("{joined} | ")
    };
    let name = format!(
        "[{}] {} {}% | {}{}",
        entry.stream.source(),
        Badge::for_score(score),
        score,
        warning_text,
        original_name
    );

    let mut stream = entry.stream.clone();
    let source_rank = priority.rank(stream.source());
    stream.name = Some(name);
    RankedStream {
        score,
        index: entry.index,
        original_name,
        codec: entry.info.codec,
        size: stream.size,
        source_rank,
        stream,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sluice_parse::{Codec, KeywordExtractor};

    const GB: f64 = (1u64 << 30) as f64;

    fn pc() -> Profile {
        Profile {
            name: "PC".into(),
            allow_codecs: vec![Codec::Hevc, Codec::H264],
            allow_hdr: true,
            allow_dolby_vision: true,
            allow_10bit: true,
            block_remux: false,
            warn_lossless_audio: false,
            max_file_size_gb: Some(80.0),
            max_resolution: Some(2160),
        }
    }

    fn weak_tv() -> Profile {
        Profile {
            name: "WEAK_TV".into(),
            allow_codecs: vec![Codec::Hevc],
            allow_hdr: false,
            allow_dolby_vision: false,
            allow_10bit: false,
            block_remux: true,
            warn_lossless_audio: true,
            max_file_size_gb: Some(25.0),
            max_resolution: Some(2160),
        }
    }

    fn raw(name: &str, source: &str, size: Option<f64>) -> RawStream {
        RawStream {
            name: Some(name.into()),
            source: Some(source.into()),
            size,
            ..Default::default()
        }
    }

    fn priority() -> SourcePriority {
        SourcePriority::new(vec!["Torrentio".into(), "MediaFusion".into()])
    }

    fn run(streams: Vec<RawStream>, profile: &Profile) -> RankOutcome {
        rank(streams, profile, &KeywordExtractor, &priority())
    }

    #[test]
    fn test_sorted_by_score_descending_then_index() {
        let outcome = run(
            vec![
                raw("Alpha.Movie.2021.1080p.x265", "Torrentio", None),
                raw("Beta.Film.2022.1080p.x265.REMUX", "Torrentio", None),
                raw("Gamma.Show.2023.1080p.x265", "Torrentio", None),
            ],
            &pc(),
        );
        let order: Vec<(u8, usize)> = outcome.ranked.iter().map(|r| (r.score, r.index)).collect();
        assert_eq!(order, vec![(100, 0), (100, 2), (70, 1)]);
    }

    #[test]
    fn test_non_playable_dropped_but_remembered() {
        let outcome = run(
            vec![
                raw("Movie.2023.1080p.x264-GRP", "Torrentio", None),
                raw("Movie.2023.1080p.x265-GRP", "Torrentio", None),
            ],
            &weak_tv(),
        );
        assert_eq!(outcome.ranked.len(), 1);
        assert_eq!(outcome.evaluated.len(), 2);
        assert!(!outcome.evaluated[0].verdict.playable);
    }

    #[test]
    fn test_duplicates_merge_into_higher_scorer_with_union_warnings() {
        let outcome = run(
            vec![
                raw("Movie.2023.1080p.x265.Atmos", "Torrentio", Some(4.0 * GB)),
                raw("Movie 2023 1080p x265", "MediaFusion", Some(4.1 * GB)),
            ],
            &weak_tv(),
        );
        assert_eq!(outcome.ranked.len(), 1);

        let merged = &outcome.ranked[0];
        // Higher scorer (the clean MediaFusion entry) keeps its identity...
        assert_eq!(merged.score, 100);
        assert_eq!(merged.index, 1);
        assert_eq!(merged.original_name, "Movie 2023 1080p x265");
        // ...but the folded entry's warning survives the merge.
        assert_eq!(
            merged.stream.display_name(),
            "[MediaFusion] ⭐ 100% | Lossless audio may cause buffering | Movie 2023 1080p x265"
        );
    }

    #[test]
    fn test_score_tie_keeps_the_incumbent() {
        let outcome = run(
            vec![
                raw("Movie.2023.1080p.x265-GRP", "Torrentio", Some(4.0 * GB)),
                raw("Movie.2023.1080p.x265-GRP", "MediaFusion", Some(4.0 * GB)),
            ],
            &pc(),
        );
        assert_eq!(outcome.ranked.len(), 1);
        assert_eq!(outcome.ranked[0].stream.source(), "Torrentio");
        assert_eq!(outcome.ranked[0].index, 0);
    }

    #[test]
    fn test_display_name_without_warnings_omits_the_segment() {
        let outcome = run(vec![raw("Movie.2023.1080p.x265", "Torrentio", None)], &pc());
        assert_eq!(
            outcome.ranked[0].stream.display_name(),
            "[Torrentio] ⭐ 100% | Movie.2023.1080p.x265"
        );
    }

    #[test]
    fn test_caution_badge_for_mid_scores() {
        let outcome = run(
            vec![raw("Movie.2023.1080p.x265.REMUX", "Torrentio", None)],
            &pc(),
        );
        assert_eq!(
            outcome.ranked[0].stream.display_name(),
            "[Torrentio] ⚠️ 70% | REMUX – very high bitrate | Movie.2023.1080p.x265.REMUX"
        );
    }

    #[test]
    fn test_badge_tiers() {
        assert_eq!(Badge::for_score(100), Badge::Star);
        assert_eq!(Badge::for_score(80), Badge::Star);
        assert_eq!(Badge::for_score(79), Badge::Caution);
        assert_eq!(Badge::for_score(40), Badge::Caution);
        assert_eq!(Badge::for_score(39), Badge::Fail);
        assert_eq!(Badge::for_score(0), Badge::Fail);
    }

    #[test]
    fn test_empty_input_yields_empty_outcome() {
        let outcome = run(Vec::new(), &pc());
        assert!(outcome.ranked.is_empty());
        assert!(outcome.evaluated.is_empty());
    }

    #[test]
    fn test_untagged_source_gets_default_label_and_last_rank() {
        let outcome = run(
            vec![RawStream {
                name: Some("Movie.2023.1080p.x265".into()),
                ..Default::default()
            }],
            &pc(),
        );
        let entry = &outcome.ranked[0];
        assert!(entry.stream.display_name().starts_with("[Unknown] "));
        assert_eq!(entry.source_rank, 2);
    }
}
