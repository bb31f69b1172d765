//! The refresh-token exchange.
//!
//! A fixed mutation that trades the current refresh token for a new
//! `{ accessToken, refreshToken, expiration }` triple. Any other outcome,
//! including a triple whose expiration does not parse, is a failed refresh.

use super::Dispatcher;
use crate::credentials::Credential;
use crate::envelope::decode_outcome;
use crate::operation::Operation;

use common::RedactedToken;

use std::time::SystemTime;

use chrono::DateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

const REFRESH_TOKEN_OPERATION_NAME: &str = "RefreshToken";
pub const REFRESH_TOKEN_DOCUMENT: &str = "mutation RefreshToken($refreshToken: String!) { \
     refreshToken(refreshToken: $refreshToken) { accessToken refreshToken expiration } }";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenInput<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenData {
    refresh_token: RefreshedCredential,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshedCredential {
    access_token: RedactedToken,
    refresh_token: RedactedToken,
    expiration: String,
}

impl RefreshedCredential {
    /// Any RFC 3339 offset is accepted; the expiry is stored as an instant.
    fn into_credential(self) -> Result<Credential, chrono::ParseError> {
        let expires_at = DateTime::parse_from_rfc3339(&self.expiration)?;

        Ok(Credential::new(self.access_token)
            .with_refresh_token(self.refresh_token)
            .with_expiry(SystemTime::from(expires_at)))
    }
}

fn refresh_operation<'a>() -> Operation<RefreshTokenInput<'a>, RefreshTokenData> {
    Operation::mutation(REFRESH_TOKEN_OPERATION_NAME, REFRESH_TOKEN_DOCUMENT)
}

impl Dispatcher {
    /// Exchange `refresh_token` once. `None` means the refresh failed.
    pub(super) async fn exchange_refresh_token(
        &self,
        refresh_token: &RedactedToken,
    ) -> Option<Credential> {
        let operation = refresh_operation();
        let input = RefreshTokenInput {
            refresh_token: refresh_token.expose(),
        };

        // Sent without a bearer token
        let request = match operation.build_request(&input, &self.graphql_path, None) {
            Ok(request) => request,
            Err(failure) => {
                warn!("Could not encode refresh exchange: {failure}");
                return None;
            }
        };

        debug!("Exchanging refresh token (request {})", request.request_id);

        let data: RefreshTokenData = match decode_outcome(self.transport.send(request).await) {
            Ok(data) => data,
            Err(rejection) => {
                warn!("Refresh exchange rejected: {rejection}");
                return None;
            }
        };

        match data.refresh_token.into_credential() {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!("Refresh exchange returned an unreadable expiration: {e}");
                None
            }
        }
    }
}
