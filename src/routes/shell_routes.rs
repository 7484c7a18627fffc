//! Dashboard paths, the session API and the live view stream.

use std::convert::Infallible;

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures::stream::{self, Stream};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::gate::{self, GateOutcome};
use crate::metrics::MetricsRecorder;
use crate::navigation::table::ROOT_PATH;
use crate::navigation::{LiveView, Resolution};
use crate::session::SessionState;
use crate::state::AppState;
use crate::utils::http_helpers::AccessToken;
use crate::view::{render_html, View};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/session", get(session))
        .route("/api/live", get(live))
        .fallback(get(render_path))
}

async fn resolve_session(state: &AppState, token: Option<&str>) -> SessionState {
    match state.auth.resolve(token).await {
        Some(profile) => SessionState::authenticated(profile),
        None => SessionState::anonymous(),
    }
}

/// Resolves the request path through the route table and the gate.
///
/// Redirects answer `303 See Other`: the gated URL never becomes a history entry.
async fn render_path(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    uri: Uri,
) -> Response {
    let path = uri.path();
    let route = match state.table.resolve(path) {
        Resolution::Matched(route) => route,
        Resolution::Fallback { to } => {
            debug!("No route for {}; redirecting to {}", path, to);
            state.metrics.record_gate_decision("fallback", "redirect");
            return Redirect::to(to).into_response();
        }
    };

    let session = resolve_session(&state, token.as_deref()).await;
    let outcome = gate::decide(&route, &session);
    state
        .metrics
        .record_gate_decision(route.access.as_str(), outcome.as_str());
    debug!(
        event_name = "gate.decision",
        event_domain = "routing",
        path,
        page = route.page.as_str(),
        access = route.access.as_str(),
        outcome = outcome.as_str(),
        "gate decision"
    );

    match outcome {
        GateOutcome::Pending => Html(render_html(&View::Spinner)).into_response(),
        GateOutcome::Redirect(nav) => Redirect::to(nav.to).into_response(),
        GateOutcome::Render => {
            Html(render_html(&View::page(&route, &session, &state.table))).into_response()
        }
    }
}

/// The resolved session for the request's token.
async fn session(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Json<SessionState> {
    Json(resolve_session(&state, token.as_deref()).await)
}

#[derive(Deserialize)]
struct LiveQuery {
    path: Option<String>,
}

/// Streams the screen for `path`: once immediately (usually the progress
/// indicator while the session resolves) and again after every session change.
async fn live(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(query): Query<LiveQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let context = state.auth.spawn_resolution(token);
    let path = query.path.unwrap_or_else(|| ROOT_PATH.to_string());
    let mut view = LiveView::new((*state.table).clone(), path, context.subscribe());
    let first = view.current();

    // The context travels with the stream so the sender outlives the resolution.
    let events = stream::unfold(
        (Some(first), view, context),
        |(pending, mut view, context)| async move {
            let screen = match pending {
                Some(screen) => screen,
                None => view.next().await?,
            };
            let event = Event::default()
                .event("screen")
                .json_data(&screen)
                .unwrap_or_else(|e| {
                    warn!("Failed to serialize screen: {}", e);
                    Event::default().event("error").data(e.to_string())
                });
            Some((Ok::<_, Infallible>(event), (None, view, context)))
        },
    );

    Sse::new(events).keep_alive(KeepAlive::default())
}
