//! Stream ranking & deduplication engine.
//!
//! Pure and stateless: every function is a deterministic function of its
//! inputs plus the immutable configuration tables (profiles, source
//! priority) threaded through explicitly. No I/O happens here; upstream
//! fetching and the HTTP surface live in the sibling crates.

pub mod config;
pub mod error;
pub mod evaluate;
pub mod models;
pub mod profile;
pub mod rank;
pub mod select;
pub mod similarity;

pub use config::{AppConfig, ServerConfig, SourcePriority, UpstreamConfig};
pub use error::SluiceError;
pub use evaluate::{evaluate, Verdict, Warning};
pub use models::{EvaluatedStream, RankedStream, RawStream};
pub use profile::{Profile, DEFAULT_PROFILE};
pub use rank::{annotate, rank, Badge, RankOutcome};
pub use select::auto_pick;
pub use similarity::is_duplicate;
