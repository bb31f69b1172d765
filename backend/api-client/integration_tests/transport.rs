use crate::helpers::{config_for, data_body, unreachable_config};

use api_client::operation::HttpMethod;
use api_client::transport::{HttpTransport, Transport, TransportRequest};

use common::{HttpStatusCode, RedactedToken};

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// ============================================================================
// HttpTransport wire behavior against a mock API
// ============================================================================

fn post(path: &str, bearer: Option<&str>) -> TransportRequest {
    TransportRequest {
        method: HttpMethod::Post,
        path: path.to_string(),
        body: Some(json!({ "operationName": "Viewer", "query": "q", "variables": {} })),
        bearer: bearer.map(RedactedToken::from),
        request_id: Uuid::new_v4(),
    }
}

/// **VALUE**: Verifies the bearer token, request id, and JSON body reach the server.
///
/// **WHY THIS MATTERS**: The API authenticates on the Authorization header and correlates
/// logs on the request id.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - The token is sent without the `Bearer` scheme
/// - The request id header is dropped
/// - The path is resolved against the wrong base
#[tokio::test]
async fn given_authenticated_request_when_sent_then_headers_and_body_delivered() {
    // GIVEN: A mock API expecting an authenticated GraphQL POST
    let server = MockServer::start().await;
    let request = post("graphql", Some("access-123"));

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("authorization", "Bearer access-123"))
        .and(header("x-request-id", request.request_id.to_string().as_str()))
        .and(body_json(request.body.clone().expect("body")))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body(json!({ "ok": true }))))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport builds");

    // WHEN: Sending
    let response = transport.send(request).await.expect("response received");

    // THEN: Status and parsed body are surfaced
    assert_eq!(response.status, HttpStatusCode::OK);
    assert_eq!(response.body, Some(data_body(json!({ "ok": true }))));
}

/// **VALUE**: Verifies anonymous requests carry no Authorization header at all.
#[tokio::test]
async fn given_anonymous_request_when_sent_then_no_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header_exists("x-request-id"))
        .and(|request: &Request| !request.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport builds");

    let response = transport.send(post("graphql", None)).await.expect("response received");

    assert!(response.status.is_success());
}

/// **VALUE**: Verifies a non-JSON error page is delivered as a response without a body.
///
/// **WHY THIS MATTERS**: Load balancers answer 502 with HTML. That is a response, not a
/// transport failure, and the envelope decoder must see its status.
///
/// **BUG THIS CATCHES**: Would catch HTML bodies being reported as transport errors.
#[tokio::test]
async fn given_html_error_page_when_sent_then_status_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport builds");

    let response = transport.send(post("graphql", None)).await.expect("response received");

    assert_eq!(response.status, HttpStatusCode(502));
    assert!(response.status.is_server_error());
    assert!(response.body.is_none());
}

/// **VALUE**: Verifies a REST GET is sent without a body to `{base}/{name}`.
#[tokio::test]
async fn given_rest_get_when_sent_then_path_joined_under_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body(json!("up"))))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&config_for(&server)).expect("transport builds");
    let request = TransportRequest {
        method: HttpMethod::Get,
        path: "/v1/health".to_string(),
        body: None,
        bearer: None,
        request_id: Uuid::new_v4(),
    };

    let response = transport.send(request).await.expect("response received");

    assert_eq!(response.body, Some(data_body(json!("up"))));
}

/// **VALUE**: Verifies an unreachable API is a transport error flagged as a connection failure.
#[tokio::test]
async fn given_nothing_listening_when_sent_then_connection_error() {
    let transport = HttpTransport::new(&unreachable_config()).expect("transport builds");

    let failure = transport
        .send(post("graphql", None))
        .await
        .expect_err("no response");

    assert!(failure.is_connection());
}
