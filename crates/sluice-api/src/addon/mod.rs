pub mod client;
pub mod error;
pub mod types;

pub use client::AddonClient;
pub use error::AddonError;
