use reqwest::StatusCode;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Minimum value not met. {min} required but found {actual}")]
    BelowMinimum { min: u64, actual: u64 },
    #[error("\".\" and \"..\" are not allowed as a path segment")]
    DotSegment,
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error("user not logged in")]
pub struct NotLoggedInError;

/// Body the backend sends with errors and simple confirmations
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A request reached the backend but was not successful
///
/// Travels inside [`anyhow::Error`] on the client so callers that need the
/// status can recover it with `downcast_ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Returns `true` if the backend rejected the credentials that were sent
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status == StatusCode::FORBIDDEN
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{message}"),
            None => write!(
                f,
                "request failed with status code: {} and no body",
                self.status
            ),
        }
    }
}

impl std::error::Error for ApiError {}
