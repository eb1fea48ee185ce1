//! Error types for the viewer
//!
//! Only `NotInListing`, `NoParent` and `ReadDir` reach the user (as a
//! message box). Config and probe errors are logged and otherwise ignored.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or displaying an image
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The invoked file is not part of its own folder listing
    /// (deleted in the meantime, or not an allowed image type)
    #[error("Could not determine image file's index in directory.")]
    NotInListing { path: PathBuf },

    /// The invoked path has no containing folder
    #[error("Could not determine the folder of {path}")]
    NoParent { path: PathBuf },

    /// Listing the containing folder failed
    #[error("Failed to list {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Reading the config file failed
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `Config`
    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Probing image metadata failed
    #[error("Failed to probe {path}: {message}")]
    Probe { path: PathBuf, message: String },
}

impl ViewerError {
    /// Whether this error should be surfaced to the user rather than only logged
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotInListing { .. } | Self::NoParent { .. } | Self::ReadDir { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_in_listing_message() {
        let err = ViewerError::NotInListing { path: PathBuf::from("/tmp/a.png") };
        assert_eq!(
            err.to_string(),
            "Could not determine image file's index in directory."
        );
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_probe_is_not_user_facing() {
        let err = ViewerError::Probe {
            path: PathBuf::from("/tmp/a.png"),
            message: "truncated".to_string(),
        };
        assert!(!err.is_user_facing());
    }
}
