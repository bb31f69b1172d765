pub mod api_error;
pub mod config;
pub mod envelope;
pub mod transport;

pub use api_error::{ApiError, ErrorCode, GENERIC_SERVER_ERROR_MESSAGE, LocalizedText};
pub use config::ConfigError;
pub use envelope::EnvelopeError;
pub use transport::TransportError;

use thiserror::Error;

/// Failures while wiring a client together, before any call is made.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
