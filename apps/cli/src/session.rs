//! Seeds the credential store from the environment.
//!
//! The CLI has no sign-in flow of its own; it reuses tokens issued elsewhere.

use api_client::{Credential, InMemoryCredentialStore};

use std::env;

use log::{debug, info};

pub const ACCESS_TOKEN_ENV_KEY: &str = "BILLING_ACCESS_TOKEN";
pub const REFRESH_TOKEN_ENV_KEY: &str = "BILLING_REFRESH_TOKEN";

/// Credential from `BILLING_ACCESS_TOKEN` and, if set, `BILLING_REFRESH_TOKEN`.
///
/// Blank values count as unset. A refresh token without an access token is ignored.
pub fn credential_from_env() -> Option<Credential> {
    let access_token = non_blank_var(ACCESS_TOKEN_ENV_KEY)?;
    let credential = Credential::new(access_token);

    match non_blank_var(REFRESH_TOKEN_ENV_KEY) {
        Some(refresh_token) => Some(credential.with_refresh_token(refresh_token)),
        None => {
            debug!("{REFRESH_TOKEN_ENV_KEY} unset, session cannot be refreshed");
            Some(credential)
        }
    }
}

pub fn store_from_env() -> InMemoryCredentialStore {
    let credential = credential_from_env();
    if credential.is_none() {
        info!("{ACCESS_TOKEN_ENV_KEY} unset, calling anonymously");
    }
    InMemoryCredentialStore::new(credential)
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
