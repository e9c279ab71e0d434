//! Heuristic metadata extraction from stream release names.
//!
//! Release names are free text ("Movie.2023.2160p.HEVC.REMUX-GROUP"), so
//! everything here is best-effort substring and pattern matching: extraction
//! never fails, it degrades to [`Codec::Unknown`] / `None` when nothing
//! matches. The scoring and deduplication layers treat the result as
//! authoritative, so the extractor sits behind the [`MediaExtractor`]
//! trait and a better strategy can be swapped in without touching either
//! of them.

pub mod elements;
pub mod extract;
pub mod keyword;

pub use elements::{Codec, MediaFlags, MediaInfo, Resolution};
pub use extract::{KeywordExtractor, MediaExtractor};
