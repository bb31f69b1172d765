use crate::helpers::{
    VIEWER, Viewer, ViewerData, config_for, data_body, error_body, unreachable_config,
    viewer_input, viewer_payload,
};

use api_client::error::{ErrorCode, GENERIC_SERVER_ERROR_MESSAGE};
use api_client::{Credential, CredentialStore, Dispatcher, InMemoryCredentialStore, Query};

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// ============================================================================
// Dispatcher end to end over HTTP
// ============================================================================

fn signed_in_store() -> Arc<InMemoryCredentialStore> {
    Arc::new(InMemoryCredentialStore::new(Some(
        Credential::new("old-access").with_refresh_token("old-refresh"),
    )))
}

async fn mount_viewer_for(server: &MockServer, bearer: &str, body: serde_json::Value, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "operationName": "Viewer" })))
        .and(header("authorization", format!("Bearer {bearer}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(server)
        .await;
}

/// **VALUE**: Verifies the full expiry → refresh → retry protocol over real HTTP.
///
/// **WHY THIS MATTERS**: This is the only path that writes credentials. It must send the
/// refresh token without the stale bearer and retry exactly once with the new one.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The refresh exchange carries the expired access token
/// - The retry reuses the old bearer
/// - Either endpoint is hit more than once
/// - The store is not updated with the new pair
#[tokio::test]
async fn given_expired_access_token_when_called_then_refreshed_and_retried_once() {
    // GIVEN: Old token → EXPIRED, refresh → new pair, new token → data
    let server = MockServer::start().await;

    mount_viewer_for(
        &server,
        "old-access",
        error_body("EXPIRED", "Your session has expired"),
        1,
    )
    .await;
    mount_viewer_for(&server, "new-access", data_body(viewer_payload()), 1).await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "RefreshToken",
            "variables": { "refreshToken": "old-refresh" },
        })))
        .and(|request: &Request| !request.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body(json!({
            "refreshToken": {
                "accessToken": "new-access",
                "refreshToken": "new-refresh",
                "expiration": "2030-06-01T12:00:00Z",
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let dispatcher =
        Dispatcher::from_config(&config_for(&server), store.clone()).expect("dispatcher builds");

    // WHEN: Calling
    let settled = dispatcher.call(&VIEWER, &viewer_input()).await;

    // THEN: Settled with data and the store holds the new pair
    assert_eq!(
        settled,
        Query::right(ViewerData {
            viewer: Viewer {
                email: "ada@example.com".to_string(),
            },
        })
    );
    let stored = store.read().expect("still signed in");
    assert_eq!(stored.access_token.expose(), "new-access");
    assert_eq!(
        stored.refresh_token.as_ref().map(|t| t.expose()),
        Some("new-refresh")
    );
}

/// **VALUE**: Verifies a rejected refresh over HTTP logs the user out and keeps the expiry error.
#[tokio::test]
async fn given_revoked_refresh_token_when_called_then_logged_out() {
    let server = MockServer::start().await;

    mount_viewer_for(
        &server,
        "old-access",
        error_body("EXPIRED", "Your session has expired"),
        1,
    )
    .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "RefreshToken" })))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_body("UNAUTHENTICATED", "Revoked")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = signed_in_store();
    let dispatcher =
        Dispatcher::from_config(&config_for(&server), store.clone()).expect("dispatcher builds");

    let settled = dispatcher.call(&VIEWER, &viewer_input()).await;

    let error = settled.left_value().expect("settles Left");
    assert_eq!(error.code(), ErrorCode::Expired);
    assert_eq!(error.message().as_str(), "Your session has expired");
    assert!(store.read().is_none());
}

/// **VALUE**: Verifies a 500 with an HTML body settles as the generic SERVER_ERROR.
///
/// **WHY THIS MATTERS**: Raw gateway pages must never reach the user.
///
/// **BUG THIS CATCHES**: Would catch a non-JSON body being retried or surfaced verbatim.
#[tokio::test]
async fn given_html_server_error_when_called_then_generic_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::from_config(&config_for(&server), signed_in_store())
        .expect("dispatcher builds");

    let settled = dispatcher.call(&VIEWER, &viewer_input()).await;

    let error = settled.left_value().expect("settles Left");
    assert_eq!(error.code(), ErrorCode::ServerError);
    assert_eq!(error.message().as_str(), GENERIC_SERVER_ERROR_MESSAGE);
}

/// **VALUE**: Verifies an unreachable API settles as SERVER_ERROR and leaves the session alone.
#[tokio::test]
async fn given_unreachable_api_when_called_then_server_error_and_still_signed_in() {
    let store = signed_in_store();
    let dispatcher =
        Dispatcher::from_config(&unreachable_config(), store.clone()).expect("dispatcher builds");

    let settled = dispatcher.call(&VIEWER, &viewer_input()).await;

    assert_eq!(
        settled.left_value().map(|e| e.code()),
        Some(ErrorCode::ServerError)
    );
    assert!(store.read().is_some());
}

/// **VALUE**: Verifies a watched call is observable as `Loading` and then settles.
#[tokio::test]
async fn given_watched_call_when_api_answers_then_receiver_settles() {
    let server = MockServer::start().await;
    mount_viewer_for(&server, "old-access", data_body(viewer_payload()), 1).await;

    let dispatcher = Arc::new(
        Dispatcher::from_config(&config_for(&server), signed_in_store())
            .expect("dispatcher builds"),
    );

    let mut receiver = dispatcher.watch(VIEWER, viewer_input());
    assert!(receiver.borrow().is_loading());

    receiver.changed().await.expect("settles");
    assert!(receiver.borrow().is_right());
}
