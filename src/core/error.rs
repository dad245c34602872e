use thiserror::Error;

use crate::features::bills::formatter::FormatError;
use crate::shared::views::ViewError;

/// Structured classification of a store failure.
///
/// Pages pick their explanation from this code instead of inspecting the
/// error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// HTTP 404
    NotFound,
    /// HTTP 5xx
    Server(u16),
    /// Any other non-success HTTP status
    Http(u16),
    /// The request never produced a response
    Network,
    /// The response body could not be decoded
    Decode,
}

impl StoreErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => StoreErrorCode::NotFound,
            500..=599 => StoreErrorCode::Server(status),
            _ => StoreErrorCode::Http(status),
        }
    }
}

/// Failure reported by the store client
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    /// Non-success HTTP response. The message reads `Erreur <status>`.
    pub fn http(status: u16) -> Self {
        Self {
            code: StoreErrorCode::from_status(status),
            message: format!("Erreur {}", status),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::Network,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::Decode,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Structured store code, when the failure came from the store
    pub fn store_code(&self) -> Option<StoreErrorCode> {
        match self {
            AppError::Store(e) => Some(e.code),
            _ => None,
        }
    }
}

impl From<ViewError> for AppError {
    fn from(e: ViewError) -> Self {
        AppError::Template(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
