//! Pure building blocks shared by the billing client.
//!
//! This crate has no I/O. It holds the values every other layer agrees on:
//! where an error was raised, HTTP status helpers, redacted credentials, and
//! the `Query` result algebra that every fetch or mutation settles into.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure data structures and the result algebra
//! - **api-client**: Envelope decoding, transport, and the authenticated dispatcher
//! - **billing-cli**: Application wiring everything together

pub mod error;
pub mod http_status;
pub mod query;
pub mod redacted_token;
pub mod semigroup;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use query::Query;
pub use redacted_token::RedactedToken;
pub use semigroup::{Concat, First, Joined, Last, Monoid, Semigroup};

#[cfg(test)]
mod tests;
