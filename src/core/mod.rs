use thiserror::Error;

use crate::{cli::CliError, config::ConfigError};

/// Top level error of a `den` invocation.
#[derive(Error, Debug)]
pub enum DenError {
    /// Command resolution or execution failed
    #[error(transparent)]
    Cli(#[from] CliError),

    /// Configuration could not be loaded before dispatch
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DenError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DenError::Cli(error) => error.exit_code(),
            _ => 1,
        }
    }
}

/// Result alias for top level operations.
pub type Result<T> = std::result::Result<T, DenError>;
