use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while reading, addressing or writing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration file exists but its content is malformed
    #[error("failed to parse config at '{path}' line {line}: {details}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// 1-based line number of the offending line
        line: usize,
        /// Parse error details
        details: String,
    },

    /// The requested section is not defined
    #[error("No `{0}` section defined.")]
    MissingSection(String),

    /// The section exists but the requested key does not
    #[error("No `{section}.{key}` option defined.")]
    MissingOption {
        /// Section that was searched
        section: String,
        /// Key that was not found
        key: String,
    },

    /// A key was required but only a bare section was given
    #[error("You need to specify a section and a key (or `section.key`).")]
    MissingKey,

    /// I/O operation error on a configuration file
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },
}

impl ConfigError {
    /// Creates an I/O error with file path context.
    pub fn io(error: impl std::fmt::Display, path: &Path) -> Self {
        ConfigError::Io {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
