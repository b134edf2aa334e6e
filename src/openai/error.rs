// Training service errors

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status
    #[error("{operation} failed with status {status}: {body}")]
    Api {
        operation: &'static str,
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...)
    #[error("failed to reach training service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A success status with a body we couldn't use
    #[error("unexpected response from training service: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Status code, when the service itself rejected the request
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ServiceError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
