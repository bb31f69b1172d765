use super::{Transport, TransportRequest, TransportResponse};
use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::operation::HttpMethod;

use common::HttpStatusCode;

use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::{debug, error};
use reqwest::{Client, Method};
use url::Url;

const REQUEST_ID_HEADER_KEY: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    /// Build a transport for `config.base_url`.
    ///
    /// # Errors
    /// Returns [`TransportError`] if the base URL does not parse or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let mut base_url = Url::parse(&config.base_url)?;

        // `Url::join` replaces the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.base_url.join(request.path.trim_start_matches('/'))?;

        debug!(
            "{} {} (request {})",
            request.method, url, request.request_id
        );

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url)
            .header(REQUEST_ID_HEADER_KEY, request.request_id.to_string());

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.inspect_err(|e| {
            error!("Transport failure for request {}: {e}", request.request_id);
        })?;

        let status = HttpStatusCode(response.status().as_u16());
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).ok();

        if body.is_none() {
            debug!(
                "Response to request {} (HTTP {status}) is not JSON",
                request.request_id
            );
        }

        Ok(TransportResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'_, Result<TransportResponse, TransportError>> {
        self.execute(request).boxed()
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}
