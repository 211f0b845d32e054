//! Error types
//!
//! Only discovery and configuration errors abort a run. Resolution errors are
//! fatal for a single file and get recorded in the run report instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the specs adapter
#[derive(Error, Debug)]
pub enum SpecsError {
    #[error("Cannot read spec directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Cannot resolve {path} to a unit identifier: {reason}")]
    Resolution { path: PathBuf, reason: String },

    #[error("Invalid test pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SpecsError {
    pub(crate) fn resolution(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        SpecsError::Resolution {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type SpecsResult<T> = std::result::Result<T, SpecsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_message() {
        let err = SpecsError::resolution("a/b.scala", "not under source root");
        assert!(matches!(err, SpecsError::Resolution { .. }));
        assert_eq!(
            err.to_string(),
            "Cannot resolve a/b.scala to a unit identifier: not under source root"
        );
    }

    #[test]
    fn test_config_message() {
        let err = SpecsError::Config("max_concurrent must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_concurrent must be at least 1"
        );
    }
}
