//! Errors that abort a reconciliation run.
//!
//! A namespace file missing from a locale is not an error: it is reported
//! through [`crate::reconciler::RunReport`] and the run continues.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};

#[derive(Error, Debug)]
pub enum ReconcilerError {
    /// A translation or aggregate file is not a flat JSON object of strings.
    #[error("Malformed translation file '{}': {source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file or directory could not be read, created or written.
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("Failed to encode '{}': {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

impl ReconcilerError {
    pub(crate) fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem { operation, path: path.into(), source }
    }
}
