//! API client errors
//!
//! Error taxonomy for the Trinity client:
//! - **Transport**: connection/timeout failures from reqwest
//! - **Status**: non-2xx API responses passed through to the caller
//! - **SessionExpired**: refresh credential missing or the refresh call
//!   failed; the session has been cleared and the user must log in again

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API client and the typed services
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Session expired - please log in again")]
    SessionExpired,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Status code of the API response, if this error carries one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// True when the server rejected the call as unauthenticated
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
