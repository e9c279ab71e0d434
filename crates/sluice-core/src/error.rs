use thiserror::Error;

/// Errors surfaced at the engine's collaborator edges (configuration, IO).
/// The ranking core itself is total over its inputs and never errors.
#[derive(Debug, Error)]
pub enum SluiceError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
