//! Test helpers for HTTP integration tests.
//!
//! This module provides utilities for driving the client against a mock API:
//! - Config pointing at a `wiremock` server
//! - GraphQL envelope bodies
//! - A sample operation with typed input and output

use api_client::config::ApiConfig;
use api_client::operation::Operation;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const VIEWER_DOCUMENT: &str = "query Viewer($locale: String!) { viewer { email } }";

#[derive(Debug, Serialize)]
pub struct ViewerInput {
    pub locale: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewerData {
    pub viewer: Viewer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Viewer {
    pub email: String,
}

pub const VIEWER: Operation<ViewerInput, ViewerData> = Operation::query("Viewer", VIEWER_DOCUMENT);

pub fn viewer_input() -> ViewerInput {
    ViewerInput {
        locale: "en-GB".to_string(),
    }
}

/// Config for a client talking to `server`.
pub fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    }
}

/// Config for a base URL nothing listens on.
pub fn unreachable_config() -> ApiConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    ApiConfig {
        base_url: format!("http://127.0.0.1:{port}/"),
        ..ApiConfig::default()
    }
}

pub fn data_body(payload: Value) -> Value {
    json!({ "data": payload })
}

pub fn error_body(code: &str, message: &str) -> Value {
    json!({ "errors": [{ "message": message, "extensions": { "code": code } }] })
}

pub fn viewer_payload() -> Value {
    json!({ "viewer": { "email": "ada@example.com" } })
}
