//! Authenticated call dispatcher.
//!
//! Each call runs: encode → attach bearer → send → decode envelope. If the
//! envelope reports an expired credential, the dispatcher exchanges the
//! refresh token once and re-sends the original request once. Whatever that
//! second attempt produces is final; a second expiry is not refreshed again.
//! If no refresh is possible the credential is cleared (forced logout) and
//! the call settles with the original expiry error.
//!
//! Refresh exchanges are serialised behind one guard. A call that waited on
//! the guard and finds a different access token in the store than the one it
//! sent reuses that credential instead of exchanging again.
//!
//! There is no backoff, no retry on transport failures, no deduplication of
//! identical calls, and no cancellation.

mod refresh;

pub use refresh::REFRESH_TOKEN_DOCUMENT;

use crate::config::ApiConfig;
use crate::credentials::{Credential, CredentialStore};
use crate::envelope::decode_outcome;
use crate::error::{ApiError, TransportError};
use crate::operation::Operation;
use crate::transport::{HttpTransport, Transport};

use common::Query;

use std::sync::Arc;

use log::{debug, error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, watch};

pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    graphql_path: String,
    refresh_guard: Mutex<()>,
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            transport,
            credentials,
            graphql_path: config.graphql_path.clone(),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Dispatcher over an [`HttpTransport`] for `config.base_url`.
    ///
    /// # Errors
    /// Returns [`TransportError`] if the HTTP transport cannot be built.
    pub fn from_config(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        Ok(Self::new(transport, credentials, config))
    }

    /// Run `operation` with `input` to settlement.
    ///
    /// Never returns `Loading`; use [`Dispatcher::watch`] to observe the
    /// in-flight state.
    pub async fn call<I, O>(&self, operation: &Operation<I, O>, input: &I) -> Query<ApiError, O>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let credential = self.credentials.read();

        let settled = match self.attempt(operation, input, credential.as_ref()).await {
            Err(error) if error.code().triggers_refresh() => {
                debug!("{} reported {}, refreshing", operation.name(), error.code());
                self.refresh_and_retry(operation, input, credential, error)
                    .await
            }
            outcome => outcome,
        };

        match &settled {
            Ok(_) => debug!("{} settled Right", operation.name()),
            Err(e) => debug!("{} settled Left({})", operation.name(), e.code()),
        }

        Query::from(settled)
    }

    /// Start `operation` on the runtime and observe it.
    ///
    /// The receiver starts at `Loading` and is replaced exactly once with the
    /// settled value. Dropping the receiver does not cancel the call.
    pub fn watch<I, O>(
        self: &Arc<Self>,
        operation: Operation<I, O>,
        input: I,
    ) -> watch::Receiver<Query<ApiError, O>>
    where
        I: Serialize + Send + Sync + 'static,
        O: DeserializeOwned + Send + Sync + 'static,
    {
        let (sender, receiver) = watch::channel(Query::loading());
        let dispatcher = Arc::clone(self);

        tokio::spawn(async move {
            let settled = dispatcher.call(&operation, &input).await;
            sender.send_replace(settled);
        });

        receiver
    }

    async fn attempt<I, O>(
        &self,
        operation: &Operation<I, O>,
        input: &I,
        credential: Option<&Credential>,
    ) -> Result<O, ApiError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let bearer = credential.map(|c| c.access_token.clone());

        let request = match operation.build_request(input, &self.graphql_path, bearer) {
            Ok(request) => request,
            Err(failure) => {
                error!("Could not encode {}: {failure}", operation.name());
                return Err(ApiError::server_error());
            }
        };

        debug!(
            "Sending {} (request {}, authenticated: {})",
            operation.name(),
            request.request_id,
            request.bearer.is_some()
        );

        decode_outcome(self.transport.send(request).await)
    }

    async fn refresh_and_retry<I, O>(
        &self,
        operation: &Operation<I, O>,
        input: &I,
        used: Option<Credential>,
        expired: ApiError,
    ) -> Result<O, ApiError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let refreshed = {
            let _guard = self.refresh_guard.lock().await;
            let used_token = used.as_ref().map(|c| &c.access_token);

            match self.credentials.read() {
                Some(current) if used_token != Some(&current.access_token) => {
                    debug!("Credential was replaced while waiting, reusing it");
                    Some(current)
                }
                Some(Credential {
                    refresh_token: Some(refresh_token),
                    ..
                }) => {
                    let exchanged = self.exchange_refresh_token(&refresh_token).await;
                    if let Some(credential) = &exchanged {
                        self.credentials.write(credential.clone());
                    }
                    exchanged
                }
                _ => None,
            }
        };

        let Some(credential) = refreshed else {
            self.force_logout(operation.name());
            return Err(expired);
        };

        // Single retry; its outcome is final even if it is another expiry
        self.attempt(operation, input, Some(&credential)).await
    }

    fn force_logout(&self, operation_name: &str) {
        warn!("Credential for {operation_name} could not be refreshed, logging out");
        self.credentials.clear();
    }
}
