//! Reasons a response could not be classified from its envelope.
//!
//! None of these reach callers: the decoder logs them and settles with the
//! generic `SERVER_ERROR`.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum EnvelopeError {
    #[error("Request Encode Error: {message} {location}")]
    Encode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed Body Error: HTTP {status} - {message} {location}")]
    MalformedBody {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Error Envelope Decode Error: {message} {location}")]
    ErrorList {
        message: String,
        location: ErrorLocation,
    },

    #[error("Payload Schema Error: {message} {location}")]
    Schema {
        message: String,
        location: ErrorLocation,
    },
}

impl EnvelopeError {
    #[track_caller]
    pub fn encode(error: &serde_json::Error) -> Self {
        EnvelopeError::Encode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_body(status: HttpStatusCode, message: impl Into<String>) -> Self {
        EnvelopeError::MalformedBody {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn error_list(message: impl Into<String>) -> Self {
        EnvelopeError::ErrorList {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn schema(error: &serde_json::Error) -> Self {
        EnvelopeError::Schema {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Category for log lines.
    pub fn category(&self) -> &'static str {
        match self {
            EnvelopeError::Encode { .. } => "encode",
            EnvelopeError::MalformedBody { .. } => "malformed_body",
            EnvelopeError::ErrorList { .. } => "error_list",
            EnvelopeError::Schema { .. } => "schema",
        }
    }
}
