use reqwest::StatusCode;
use thiserror::Error;

use crate::paging::PageError;

/// Errors that can occur when talking to the library API
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The request could not be sent or its response could not be read
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API responded with status {status}")]
    HttpStatus {
        status: StatusCode,
        body: Option<String>,
    },

    /// The response body did not have the expected shape
    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Page arguments were rejected before any request was made
    #[error("Invalid page request: {0}")]
    InvalidPage(#[from] PageError),
}

impl LibraryError {
    /// Status code of an `HttpStatus` error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
