//! Error handling module
//!
//! This module defines the application-level error type and result alias.
//! Resolver failures are carried as [`EnvError`] inside [`Error::Env`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::env::EnvError;

/// Envkit error type
#[derive(Error, Debug)]
pub enum Error {
    /// IO error writing resolved output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Environment resolution error
    #[error(transparent)]
    Env(#[from] EnvError),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment file could not be read or parsed
    #[error("Environment file error in {}: {message}", path.display())]
    EnvFile {
        /// File that failed
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// Configuration error with caller context
    #[error("{context}: {source}")]
    Config {
        /// What was being loaded
        context: String,
        /// Underlying resolver failure
        #[source]
        source: EnvError,
    },
}

impl Error {
    /// Wrap a resolver failure with "failed to load ..." context
    pub fn config(context: impl Into<String>, source: EnvError) -> Self {
        Error::Config {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `Error`.
pub type Result<T> = std::result::Result<T, Error>;
