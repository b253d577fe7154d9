//! Host error types

use std::path::PathBuf;

use timetree::TreeError;

/// Errors that end the terminal host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A records or options file that is not the expected JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid records: {0}")]
    Tree(#[from] TreeError),

    #[error("failed to initialize logger: {0}")]
    Log(#[from] log::SetLoggerError),
}
