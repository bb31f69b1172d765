//! Authenticated API client for the billing application.
//!
//! Callers describe an [`operation::Operation`], hand it to a
//! [`dispatcher::Dispatcher`] together with an input value, and receive a
//! [`common::Query`] that settles into `Right(output)` or
//! `Left(`[`error::ApiError`]`)`.

pub mod config;
pub mod credentials;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod transport;

pub use common::Query;
pub use credentials::{Credential, CredentialStore, InMemoryCredentialStore};
pub use dispatcher::Dispatcher;
pub use error::{ApiError, ErrorCode, LocalizedText};
pub use operation::{HttpMethod, NoInput, Operation, OperationKind};

#[cfg(test)]
mod tests;
