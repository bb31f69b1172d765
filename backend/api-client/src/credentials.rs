//! Credential values and the store the dispatcher reads and refreshes.
//!
//! The dispatcher keeps no credential state of its own. It reads the store at
//! the start of every call and writes it only after a successful refresh.

use common::RedactedToken;

use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

/// An access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: RedactedToken,
    /// Absent when the session cannot be refreshed.
    pub refresh_token: Option<RedactedToken>,
    pub expires_at: Option<SystemTime>,
}

impl Credential {
    pub fn new(access_token: impl Into<RedactedToken>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<RedactedToken>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: SystemTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether `expires_at` lies at or before `now`. Unknown expiry counts as valid.
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Where the current account credential lives.
pub trait CredentialStore: Send + Sync {
    fn read(&self) -> Option<Credential>;
    fn write(&self, credential: Credential);
    /// Forget the credential. This is the forced-logout side effect.
    fn clear(&self);
}

/// Process-local store, the default for a single running client.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Option<Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new(credential: Option<Credential>) -> Self {
        Self {
            inner: RwLock::new(credential),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn read(&self) -> Option<Credential> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, credential: Credential) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
