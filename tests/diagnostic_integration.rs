mod common;

use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::StatusCode;
use figment::Jail;
use leilao_shell::config::{figment, load_config_from, ConfigV1};
use leilao_shell::startup::build_app;
use tower::ServiceExt;

use common::{load_test_config, request};

fn config_with_backend(backend: &str) -> String {
    format!(
        r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
{}
"#,
        backend
    )
}

async fn diagnostic_for(backend: &str, path: &str) -> (StatusCode, String) {
    render(load_test_config(&config_with_backend(backend)), path).await
}

async fn render(config: ConfigV1, path: &str) -> (StatusCode, String) {
    let response = build_app(Arc::new(config))
        .oneshot(request(path, Some("admin-token")))
        .await
        .expect("request should complete");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8(bytes.to_vec()).expect("UTF-8 body"))
}

#[tokio::test]
async fn missing_url_shows_panel_for_every_path() {
    let backend = "backend:\n  url: \"\"\n  anon_key: key";
    for path in ["/", "/login", "/setup", "/health", "/nonexistent"] {
        let (status, html) = diagnostic_for(backend, path).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{}", path);
        assert!(html.contains("Variaveis de Ambiente Faltando"));
        assert!(html.contains("<span>SUPABASE_URL:</span><span class=\"text-red-600\">FALTANDO</span>"));
        assert!(html.contains("<span>SUPABASE_ANON_KEY:</span><span class=\"text-green-600\">OK</span>"));
        assert!(!html.contains("data-page="));
    }
}

#[tokio::test]
async fn missing_key_is_marked_independently() {
    let (status, html) =
        diagnostic_for("backend:\n  url: https://example.supabase.co", "/login").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("<span>SUPABASE_URL:</span><span class=\"text-green-600\">OK</span>"));
    assert!(html.contains("<span>SUPABASE_ANON_KEY:</span><span class=\"text-red-600\">FALTANDO</span>"));
}

#[tokio::test]
async fn both_missing_are_marked() {
    let (status, html) = diagnostic_for("", "/").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(html.matches("FALTANDO").count(), 2);
}

#[tokio::test]
async fn empty_url_variable_enters_diagnostic_mode() {
    let mut loaded = None;
    Jail::expect_with(|jail| {
        jail.create_file("config.yaml", &config_with_backend(""))?;
        jail.set_env("SUPABASE_URL", "");
        jail.set_env("SUPABASE_ANON_KEY", "envkey");
        loaded = Some(load_config_from(figment())?);
        Ok(())
    });
    let config = loaded.expect("config should load inside the jail");

    let (status, html) = render(config, "/login").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(html.contains("<span>SUPABASE_URL:</span><span class=\"text-red-600\">FALTANDO</span>"));
    assert!(html.contains("<span>SUPABASE_ANON_KEY:</span><span class=\"text-green-600\">OK</span>"));
}
