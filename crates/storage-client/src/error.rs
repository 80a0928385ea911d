use std::path::PathBuf;

use reqwest::StatusCode;

use crate::constants::{MISSING_OBJECT_KEY_CODE, MISSING_OBJECT_KEY_MESSAGE};

/// Application-level failure reported by the Cube service in its response envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cube API service error [code: {code}]: {message}")]
pub struct ServiceError {
    pub code: i64,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// The envelope reported success but the object key was empty.
    pub fn missing_object_key() -> Self {
        Self::new(MISSING_OBJECT_KEY_CODE, MISSING_OBJECT_KEY_MESSAGE)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CubeError {
    /// Missing or invalid client setup, detected before any I/O
    #[error("Configuration error during {operation}: {message}")]
    Config { operation: String, message: String },

    /// The local file could not be opened or inspected
    #[error("File error during {operation} for {path:?}: {source}")]
    File { operation: String, path: PathBuf, source: std::io::Error },

    /// The request never produced a response (connection refused, timeout, broken body)
    #[error("Network error during {operation}: {source}")]
    Network { operation: String, source: reqwest::Error },

    /// The service answered with a non-2xx status
    #[error("HTTP error during {operation}: {status}, response body: {body}")]
    Http { operation: String, status: StatusCode, body: String },

    /// 2xx status but the body is not a response envelope
    #[error("Failed to parse response during {operation}: {message}, response body: {body}")]
    Parse { operation: String, message: String, body: String },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl CubeError {
    pub fn config(operation: impl Into<String>, message: impl Into<String>) -> Self {
        CubeError::Config { operation: operation.into(), message: message.into() }
    }

    pub fn file(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CubeError::File { operation: operation.into(), path: path.into(), source }
    }

    pub fn network(operation: impl Into<String>, source: reqwest::Error) -> Self {
        CubeError::Network { operation: operation.into(), source }
    }

    pub fn http(operation: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        CubeError::Http { operation: operation.into(), status, body: body.into() }
    }

    pub fn parse(operation: impl Into<String>, message: impl Into<String>, body: impl Into<String>) -> Self {
        CubeError::Parse { operation: operation.into(), message: message.into(), body: body.into() }
    }

    /// Get error type as a string for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            CubeError::Config { .. } => "config_error",
            CubeError::File { .. } => "file_error",
            CubeError::Network { .. } => "network_error",
            CubeError::Http { .. } => "http_error",
            CubeError::Parse { .. } => "parse_error",
            CubeError::Service(_) => "service_error",
        }
    }

    /// Code assigned by the service, if this is a [ServiceError].
    pub fn service_code(&self) -> Option<i64> {
        match self {
            CubeError::Service(e) => Some(e.code),
            _ => None,
        }
    }

    /// Whether repeating the same call could succeed. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            CubeError::Network { source, .. } => source.is_timeout() || source.is_connect(),
            _ => false,
        }
    }
}
