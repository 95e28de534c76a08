//! Error types for value-scout

use std::path::PathBuf;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ScoutError>;

/// Errors that stop a command.
///
/// Per-player fetch problems never show up here; they are [`FetchError`]s
/// that the pipeline records and skips.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write checkpoint {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read roster {}: {message}", path.display())]
    Roster { path: PathBuf, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unknown metric: {name}")]
    UnknownMetric { name: String },
}

impl ScoutError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ScoutError::InvalidInput {
            message: message.into(),
        }
    }
}

/// A single player's fetch or parse failure.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unrecognized page shape at {url}")]
    Unparseable { url: String },

    #[error("empty player id")]
    EmptyId,
}

impl FetchError {
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: err,
            }
        }
    }
}
