//! Upstream fetch layer: addon-protocol clients and the failure-isolated
//! fan-out the engine consumes.

pub mod addon;
pub mod aggregate;
pub mod traits;

pub use addon::{AddonClient, AddonError};
pub use aggregate::fetch_all;
pub use traits::StreamProvider;
