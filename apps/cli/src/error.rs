use common::ErrorLocation;

use thiserror::Error;

/// Errors that end a CLI run before or around a call.
///
/// A settled `Left` is not a `CliError`; it is rendered and mapped to the exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from this App
    #[error("Billing Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Unknown command or malformed arguments
    #[error("Usage Error: {message} {location}")]
    Usage {
        message: String,
        location: ErrorLocation,
    },

    /// Error from api-client setup (config, transport)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<api_client::error::CoreError> for CliError {
    #[track_caller]
    fn from(error: api_client::error::CoreError) -> Self {
        CliError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}
