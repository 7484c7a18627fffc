mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use futures::StreamExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{build_test_app, request, request_with_cookie};

async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a Location")
        .to_str()
        .expect("Location should be ASCII")
}

#[tokio::test]
async fn anonymous_visitor_sees_login() {
    let response = build_test_app()
        .oneshot(request("/login", None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-page=\"login\""));
}

#[tokio::test]
async fn authenticated_visitor_is_redirected_from_login_and_register() {
    let app = build_test_app();
    for path in ["/login", "/register"] {
        let response = app
            .clone()
            .oneshot(request(path, Some("user-token")))
            .await
            .expect("request should complete");

        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/");
    }
}

#[tokio::test]
async fn session_cookie_is_honoured() {
    let response = build_test_app()
        .oneshot(request_with_cookie(
            "/login",
            "theme=dark; sb-access-token=admin-token",
        ))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn setup_renders_with_or_without_session() {
    let app = build_test_app();
    for token in [None, Some("admin-token"), Some("unknown-token")] {
        let response = app
            .clone()
            .oneshot(request("/setup", token))
            .await
            .expect("request should complete");

        assert_eq!(response.status(), StatusCode::OK, "{:?}", token);
        assert!(body_text(response).await.contains("data-page=\"setup\""));
    }
}

#[tokio::test]
async fn unknown_path_redirects_to_root() {
    let response = build_test_app()
        .oneshot(request("/nonexistent", Some("admin-token")))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn protected_page_requires_session() {
    let response = build_test_app()
        .oneshot(request("/meus-leiloes", None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn protected_page_checks_role() {
    let app = build_test_app();

    let response = app
        .clone()
        .oneshot(request("/lojistas", Some("user-token")))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app
        .oneshot(request("/lojistas", Some("admin-token")))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-page=\"admin-lojistas\""));
    assert!(html.contains("Ana Admin"));
    assert!(!html.contains("href=\"/propostas\""));
}

#[tokio::test]
async fn auction_detail_passes_id_through() {
    let response = build_test_app()
        .oneshot(request("/leilao/abc-123", Some("lojista-token")))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("data-param-id=\"abc-123\""));
}

#[tokio::test]
async fn auction_detail_decodes_id() {
    let response = build_test_app()
        .oneshot(request("/leilao/a%20b", Some("user-token")))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("data-param-id=\"a b\""));
}

#[tokio::test]
async fn non_get_methods_are_rejected() {
    let response = build_test_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/login")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn bearer_without_token_is_a_bad_request() {
    let response = build_test_app()
        .oneshot(
            Request::builder()
                .uri("/login")
                .header(header::AUTHORIZATION, "Bearer ")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], "Bearer authorization without a token");
}

#[tokio::test]
async fn other_authorization_schemes_fall_back_to_cookie() {
    let response = build_test_app()
        .oneshot(
            Request::builder()
                .uri("/login")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .header(header::COOKIE, "sb-access-token=user-token")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn session_api_reports_profile() {
    let app = build_test_app();

    let response = app
        .clone()
        .oneshot(request("/api/session", Some("lojista-token")))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["loading"], false);
    assert_eq!(json["profile"]["role"], "lojista");

    let response = app
        .oneshot(request("/api/session", None))
        .await
        .expect("request should complete");
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["profile"].is_null());
}

#[tokio::test]
async fn live_view_streams_resolved_screen() {
    let response = build_test_app()
        .oneshot(request("/api/live?path=/login", Some("admin-token")))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::OK);

    // The first event may be the spinner or, if resolution already finished,
    // the redirected screen. Read until the dashboard shows up.
    let mut stream = response.into_body().into_data_stream();
    let mut seen = String::new();
    while !seen.contains("\"location\":\"/\"") {
        let chunk = stream
            .next()
            .await
            .expect("stream should stay open")
            .expect("chunk should be readable");
        seen.push_str(&String::from_utf8_lossy(&chunk));
    }
    assert!(seen.contains("event: screen"));
    assert!(seen.contains("\"page\":\"dashboard\""));
}

#[tokio::test]
async fn metrics_count_gate_decisions() {
    let app = build_test_app();
    app.clone()
        .oneshot(request("/login", Some("admin-token")))
        .await
        .expect("request should complete");

    let response = app
        .oneshot(request("/metrics", None))
        .await
        .expect("request should complete");
    let text = body_text(response).await;
    assert!(text.contains("gate_decisions_total{access=\"visitor_only\",outcome=\"redirect\"} 1"));
    assert!(text.contains("session_resolutions_total{provider=\"test sessions\",result=\"success\"} 1"));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = build_test_app()
        .oneshot(request("/health", None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "OK");
}
