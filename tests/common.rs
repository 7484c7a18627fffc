#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use leilao_shell::config::{load_config_from, ConfigV1};
use leilao_shell::startup::build_app;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
backend:
  url: https://example.supabase.co
  anon_key: test-anon-key
logging:
  level: "debug"
  format: "json"
auth:
  timeout_in_ms: 1000
  cookie_name: sb-access-token
  provider:
    type: plain
    name: test sessions
    sessions:
      - token: admin-token
        profile:
          id: "a1"
          email: admin@example.com
          name: Ana Admin
          role: admin
      - token: lojista-token
        profile:
          id: "l1"
          email: loja@example.com
          role: lojista
      - token: user-token
        profile:
          id: "u1"
          email: user@example.com
          role: user
"#;

pub fn load_test_config(yaml: &str) -> ConfigV1 {
    load_config_from(Figment::new().merge(Yaml::string(yaml)))
        .expect("Failed to parse test config YAML")
}

pub fn build_test_app() -> Router {
    build_app(Arc::new(load_test_config(TEST_CONFIG)))
}

pub fn request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn request_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .header("Cookie", cookie)
        .body(Body::empty())
        .expect("failed to build request")
}
