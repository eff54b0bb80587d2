//! Errors that end the process. Anything else is reported and the loop goes on.

use crate::client::ClientError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Invalid command: {0:?} (expected \"ask\" or \"ingest\")")]
    InvalidCommand(String),

    #[error("cannot open conversation: {0}")]
    Session(#[source] ClientError),

    #[error("{0}")]
    Validation(&'static str),

    #[error("cannot encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("console error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Process exit code for this error. Success is always 0.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
