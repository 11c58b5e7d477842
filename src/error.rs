//! Error types for rfmodel.
//!
//! Transport and decode failures are kept apart so callers can decide what to
//! retry. An empty link is never an error: accessors return an empty result.

use thiserror::Error;

/// Result type for rfmodel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch {uri}: {source}")]
    Transport {
        uri: String,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{resource} is not attached to a client")]
    Detached { resource: String },
}

impl Error {
    /// HTTP status of a failed fetch, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport {
                source: TransportError::Status { status },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

/// A payload did not match the JSON shape expected for its type.
#[derive(Debug, Error)]
#[error("failed to decode {type_name}: {source}")]
pub struct DecodeError {
    pub type_name: &'static str,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub fn new(type_name: &'static str, source: serde_json::Error) -> Self {
        Self { type_name, source }
    }
}

/// Failure reaching the service or reading its answer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("service answered HTTP {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid uri '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_http_failures() {
        let err = Error::Transport {
            uri: "/redfish/v1/UpdateService".to_string(),
            source: TransportError::Status { status: 404 },
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "failed to fetch /redfish/v1/UpdateService: service answered HTTP 404"
        );
    }

    #[test]
    fn decode_error_names_the_type() {
        let source = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err: Error = DecodeError::new("UpdateService", source).into();
        assert!(err.to_string().starts_with("failed to decode UpdateService"));
        assert_eq!(err.status(), None);
    }
}
