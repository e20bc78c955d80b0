use thiserror::Error;

use crate::export::ExportError;

/// Error type for agent runs
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent binary not found: {0}")]
    BinaryNotFound(String),

    #[error("failed to spawn agent process")]
    ProcessSpawnFailed,

    #[error("invalid agent configuration: {0}")]
    Config(String),

    #[error("agent timed out after {0}ms")]
    Timeout(u64),

    #[error("agent reported a fatal error: {0}")]
    Fatal(String),

    #[error("gif export failed: {0}")]
    Export(#[from] ExportError),
}
