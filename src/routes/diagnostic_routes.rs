//! The only surface served when the backend configuration is incomplete.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Router;

use crate::env_guard::EnvCheck;
use crate::view::{render_html, View};

pub fn routes(check: EnvCheck) -> Router {
    Router::new().fallback(move || async move {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(render_html(&View::Diagnostic(check))),
        )
            .into_response()
    })
}
