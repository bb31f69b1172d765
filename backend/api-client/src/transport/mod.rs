//! The seam between the dispatcher and the network.
//!
//! The dispatcher only sees [`Transport`]; [`HttpTransport`] is the reqwest
//! implementation, tests substitute scripted fakes.

pub mod http;

pub use http::HttpTransport;

use crate::error::TransportError;
use crate::operation::HttpMethod;

use common::{HttpStatusCode, RedactedToken};

use futures_util::future::BoxFuture;
use serde_json::Value;
use uuid::Uuid;

/// One outgoing request, already encoded.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,
    /// Path relative to the configured base URL.
    pub path: String,
    pub body: Option<Value>,
    pub bearer: Option<RedactedToken>,
    pub request_id: Uuid,
}

/// A response that reached us. `body` is `None` when it was not valid JSON.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: HttpStatusCode,
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn json(status: impl Into<HttpStatusCode>, body: Value) -> Self {
        Self {
            status: status.into(),
            body: Some(body),
        }
    }

    pub fn unparsable(status: impl Into<HttpStatusCode>) -> Self {
        Self {
            status: status.into(),
            body: None,
        }
    }
}

pub trait Transport: Send + Sync {
    /// Send one request.
    ///
    /// # Errors
    /// Returns [`TransportError`] only when no response was received at all.
    fn send(&self, request: TransportRequest)
    -> BoxFuture<'_, Result<TransportResponse, TransportError>>;
}
