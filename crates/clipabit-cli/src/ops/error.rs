//! Domain-specific errors for installation operations

use thiserror::Error;

/// One variant per failure class the pipeline distinguishes.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Wrong OS, host application missing, runtime missing or too old.
    /// Always fatal; carries operator guidance in the message.
    #[error("Unsupported environment: {0}")]
    Environment(String),

    /// pip missing and the one-shot ensurepip bootstrap also failed.
    #[error("Tooling failure: {0}")]
    Tooling(String),

    /// A specific dependency failed to install. No retry, no rollback.
    #[error("Failed to install dependencies: {0}")]
    Dependency(String),

    /// Filesystem trouble while deploying the plugin tree.
    #[error("Deployment failed: {0}")]
    Deploy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for InstallError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
