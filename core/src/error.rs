//! Error types for the PetFriends client and scenario runner.
//!
//! # Design
//! The client never turns an HTTP status into an error: every response the
//! service sends comes back as an `ApiResponse`. `ApiError` only covers the
//! cases where no response exists at all (the transport failed) or the
//! request could not be assembled (a photo file could not be read).
//! `ScenarioError` is what a scenario reports when one of its checks fails.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a request from producing an `ApiResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP round-trip failed before a status line was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A photo fixture could not be read from disk.
    #[error("cannot read photo {}: {source}", .path.display())]
    Photo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a scenario did not pass.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario's fixture could not be provisioned.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// A check on status or body did not hold.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// A call never produced a response.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Missing or unusable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_error_names_the_path() {
        let err = ApiError::Photo {
            path: PathBuf::from("images/cat.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read photo images/cat.jpg: gone");
    }

    #[test]
    fn api_error_is_transparent_inside_scenario_error() {
        let err: ScenarioError = ApiError::Transport("connection refused".into()).into();
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }
}
