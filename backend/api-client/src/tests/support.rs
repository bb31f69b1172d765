// Test doubles for the dispatcher: a scripted transport and a counting store.

use crate::credentials::{Credential, CredentialStore, InMemoryCredentialStore};
use crate::error::TransportError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

use common::ErrorLocation;

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::{Value, json};

pub type Scripted = Result<TransportResponse, TransportError>;

pub fn data(payload: Value) -> Scripted {
    Ok(TransportResponse::json(200, json!({ "data": payload })))
}

pub fn api_error(code: &str, message: &str) -> Scripted {
    Ok(TransportResponse::json(
        200,
        json!({ "errors": [{ "message": message, "extensions": { "code": code } }] }),
    ))
}

pub fn expired() -> Scripted {
    api_error("EXPIRED", "Your session has expired")
}

pub fn refreshed(access: &str, refresh: &str) -> Scripted {
    refreshed_until(access, refresh, "2030-01-01T00:00:00Z")
}

pub fn refreshed_until(access: &str, refresh: &str, expiration: &str) -> Scripted {
    data(json!({
        "refreshToken": {
            "accessToken": access,
            "refreshToken": refresh,
            "expiration": expiration,
        }
    }))
}

pub fn connection_refused() -> Scripted {
    Err(TransportError::Http {
        message: "connection refused".to_string(),
        is_timeout: false,
        is_connection: true,
        location: ErrorLocation::caller(),
    })
}

/// Replays queued responses. Refresh exchanges and ordinary calls have
/// separate queues so tests can count them independently.
#[derive(Default)]
pub struct ScriptedTransport {
    calls: Mutex<VecDeque<Scripted>>,
    refreshes: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<TransportRequest>>,
    yield_before_reply: bool,
}

impl ScriptedTransport {
    pub fn new(calls: Vec<Scripted>, refreshes: Vec<Scripted>) -> Self {
        Self {
            calls: Mutex::new(calls.into()),
            refreshes: Mutex::new(refreshes.into()),
            ..Self::default()
        }
    }

    /// Suspend once per send so concurrent calls interleave.
    pub fn interleaved(mut self) -> Self {
        self.yield_before_reply = true;
        self
    }

    pub fn sent(&self) -> Vec<TransportRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent().iter().filter(|r| !is_refresh(r)).count()
    }

    pub fn refresh_count(&self) -> usize {
        self.sent().iter().filter(|r| is_refresh(r)).count()
    }

    /// Bearer tokens of ordinary calls, in send order.
    pub fn bearers(&self) -> Vec<Option<String>> {
        self.sent()
            .iter()
            .filter(|r| !is_refresh(r))
            .map(|r| r.bearer.as_ref().map(|t| t.expose().to_string()))
            .collect()
    }
}

fn is_refresh(request: &TransportRequest) -> bool {
    request
        .body
        .as_ref()
        .and_then(|body| body.get("operationName"))
        .and_then(Value::as_str)
        == Some("RefreshToken")
}

impl Transport for ScriptedTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Scripted> {
        async move {
            if self.yield_before_reply {
                tokio::task::yield_now().await;
            }

            let queue = if is_refresh(&request) {
                &self.refreshes
            } else {
                &self.calls
            };
            self.sent.lock().unwrap().push(request);

            let next = queue.lock().unwrap().pop_front();
            next.unwrap_or_else(|| panic!("transport script exhausted"))
        }
        .boxed()
    }
}

/// In-memory store that counts writes and forced logouts.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryCredentialStore,
    writes: AtomicUsize,
    clears: AtomicUsize,
}

impl CountingStore {
    pub fn with(credential: Option<Credential>) -> Self {
        Self {
            inner: InMemoryCredentialStore::new(credential),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl CredentialStore for CountingStore {
    fn read(&self) -> Option<Credential> {
        self.inner.read()
    }

    fn write(&self, credential: Credential) {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.write(credential);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear();
    }
}
