//! HTTP access-token source against a mock OAuth service.
//!
//! Uses wiremock for the reachable cases and a closed local port for the
//! unreachable one.

use std::sync::Arc;
use std::time::Duration;

use axum::http::Request;
use oauth_shim::error::RestError;
use oauth_shim::services::oauth::{
    AccessToken, AccessTokenSource, Authenticator, HttpAccessTokenSource, LookupError,
    OAuthClientConfig,
};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(base: &str, timeout: Duration) -> HttpAccessTokenSource {
    let config = OAuthClientConfig {
        base_url: Url::parse(base).unwrap(),
        timeout,
    };
    HttpAccessTokenSource::new(&config).unwrap()
}

fn source(mock_server: &MockServer) -> HttpAccessTokenSource {
    source_for(&mock_server.uri(), Duration::from_millis(200))
}

async fn mount(mock_server: &MockServer, token_id: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/oauth/access_token/{token_id}")))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn fetch_decodes_token_record() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "tok123",
            "user_id": 42,
            "client_id": 7,
        })),
    )
    .await;

    let token = source(&mock_server)
        .fetch_access_token("tok123")
        .await
        .unwrap();

    assert_eq!(
        token,
        AccessToken {
            id: "tok123".into(),
            user_id: 42,
            client_id: 7,
        }
    );
}

#[tokio::test]
async fn fetch_maps_404_to_not_found_even_without_body() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "bad", ResponseTemplate::new(404)).await;

    let err = source(&mock_server)
        .fetch_access_token("bad")
        .await
        .unwrap_err();

    assert_eq!(err, LookupError::NotFound);
}

#[tokio::test]
async fn fetch_passes_structured_error_through() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "database error",
            "status": 500,
            "error": "internal_server_error",
            "causes": ["connection reset"],
        })),
    )
    .await;

    let err = source(&mock_server)
        .fetch_access_token("tok123")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LookupError::Upstream(RestError {
            message: "database error".into(),
            status: 500,
            error: "internal_server_error".into(),
            causes: vec!["connection reset".into()],
        })
    );
}

#[tokio::test]
async fn fetch_rejects_malformed_error_payload() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"),
    )
    .await;

    let err = source(&mock_server)
        .fetch_access_token("tok123")
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            LookupError::Internal {
                message: "invalid error interface when trying to get access token",
                ..
            }
        ),
        "unexpected: {err:?}"
    );
}

#[tokio::test]
async fn fetch_rejects_malformed_token_payload() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let err = source(&mock_server)
        .fetch_access_token("tok123")
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            LookupError::Internal {
                message: "error when trying to unmarshal access token response",
                ..
            }
        ),
        "unexpected: {err:?}"
    );
}

#[tokio::test]
async fn fetch_times_out_on_slow_service() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "slow", "user_id": 1, "client_id": 1}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let err = source(&mock_server)
        .fetch_access_token("slow")
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            LookupError::Internal {
                message: "invalid rest client response, when trying to get access token",
                ..
            }
        ),
        "unexpected: {err:?}"
    );
}

#[tokio::test]
async fn fetch_fails_when_service_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source_for(&format!("http://{addr}"), Duration::from_millis(200))
        .fetch_access_token("tok123")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Internal { .. }), "unexpected: {err:?}");
}

#[tokio::test]
async fn authenticate_request_end_to_end() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "tok123",
            "user_id": 42,
            "client_id": 7,
        })),
    )
    .await;

    let authenticator = Authenticator::new(Arc::new(source(&mock_server)));
    let mut req = Request::builder()
        .uri("/orders?access_token=tok123")
        .header("X-Caller-Id", "999")
        .body(())
        .unwrap();

    authenticator
        .authenticate_request(Some(&mut req))
        .await
        .unwrap();

    assert_eq!(req.headers()["x-caller-id"], "42");
    assert_eq!(req.headers()["x-client-id"], "7");
}

#[tokio::test]
async fn authenticate_request_unreachable_is_internal() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let authenticator = Authenticator::new(Arc::new(source_for(
        &format!("http://{addr}"),
        Duration::from_millis(200),
    )));
    let mut req = Request::builder()
        .uri("/orders?access_token=tok123")
        .header("X-Client-Id", "3")
        .body(())
        .unwrap();

    let err = authenticator
        .authenticate_request(Some(&mut req))
        .await
        .unwrap_err();

    assert_eq!(err.status, 500);
    assert!(req.headers().get("x-client-id").is_none());
    assert!(req.headers().get("x-caller-id").is_none());
}

#[tokio::test]
async fn fetch_passes_through_error_with_numeric_causes() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "expired",
        ResponseTemplate::new(401).set_body_string(
            r#"{"message":"expired","status":401,"error":"unauthorized","causes":[42]}"#,
        ),
    )
    .await;

    let err = source(&mock_server)
        .fetch_access_token("expired")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LookupError::Upstream(RestError {
            message: "expired".into(),
            status: 401,
            error: "unauthorized".into(),
            causes: vec![serde_json::json!(42)],
        })
    );
}

#[tokio::test]
async fn authenticate_request_returns_wrapped_upstream_500() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(500).set_body_string(
            r#"{"message":"error when trying to get access token","status":500,"error":"internal_server_error","causes":[{}]}"#,
        ),
    )
    .await;

    let authenticator = Authenticator::new(Arc::new(source(&mock_server)));
    let mut req = Request::builder()
        .uri("/orders?access_token=tok123")
        .body(())
        .unwrap();

    let err = authenticator
        .authenticate_request(Some(&mut req))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RestError {
            message: "error when trying to get access token".into(),
            status: 500,
            error: "internal_server_error".into(),
            causes: vec![serde_json::json!({})],
        }
    );
    assert!(req.headers().get("x-caller-id").is_none());
}

#[tokio::test]
async fn authenticate_request_zero_fills_missing_token_fields() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "tok123",
        ResponseTemplate::new(200).set_body_string(r#"{"id":"tok123","user_id":42}"#),
    )
    .await;

    let authenticator = Authenticator::new(Arc::new(source(&mock_server)));
    let mut req = Request::builder()
        .uri("/orders?access_token=tok123")
        .header("X-Client-Id", "5")
        .body(())
        .unwrap();

    authenticator
        .authenticate_request(Some(&mut req))
        .await
        .unwrap();

    assert_eq!(req.headers()["x-caller-id"], "42");
    assert_eq!(req.headers()["x-client-id"], "0");
}
