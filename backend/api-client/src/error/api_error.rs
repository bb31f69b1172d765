//! Caller-facing error taxonomy.
//!
//! Key design decisions:
//! - `ErrorCode` is closed; callers branch on it and nothing else
//! - `ApiError` is a plain value (no location, no source) so it can sit
//!   inside a `Query` and be compared, cloned, and rendered
//! - Only the envelope decoder constructs it

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Message shown for every failure the server did not describe itself.
pub const GENERIC_SERVER_ERROR_MESSAGE: &str =
    "Something went wrong on our side. Please try again later.";

/// Closed set of error codes a settled `Left` can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Client input was rejected.
    #[serde(alias = "BAD_USER_INPUT")]
    BadRequest,
    /// No valid credential; signing in again is required.
    Unauthenticated,
    /// The access token expired and a refresh may recover it.
    #[serde(alias = "TOKEN_EXPIRED")]
    Expired,
    Forbidden,
    NotFound,
    Conflict,
    /// Server failure, transport failure, or an undecodable response.
    #[serde(alias = "INTERNAL_SERVER_ERROR")]
    ServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::Expired => "EXPIRED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::ServerError => "SERVER_ERROR",
        }
    }

    /// Only an expired credential starts the refresh-and-retry path.
    pub fn triggers_refresh(&self) -> bool {
        matches!(self, ErrorCode::Expired)
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ErrorCode::Unauthenticated | ErrorCode::Expired)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable text meant for the user, already in their language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(String);

impl LocalizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A classified failure, as surfaced to callers inside `Query::Left`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, ThisError)]
#[error("{code}: {message}")]
pub struct ApiError {
    code: ErrorCode,
    message: LocalizedText,
}

impl ApiError {
    pub(crate) fn new(code: ErrorCode, message: LocalizedText) -> Self {
        Self { code, message }
    }

    /// The catch-all for transport, decode, and envelope failures.
    pub(crate) fn server_error() -> Self {
        Self::new(
            ErrorCode::ServerError,
            LocalizedText::new(GENERIC_SERVER_ERROR_MESSAGE),
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &LocalizedText {
        &self.message
    }
}
