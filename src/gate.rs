//! Route access decisions.
//!
//! Every function here is pure: the outcome depends only on the session
//! snapshot and the matched route, so callers re-run it on every change.

use serde::Serialize;

use crate::navigation::table::{Access, Page, RouteMatch, LOGIN_PATH, ROOT_PATH};
use crate::session::SessionState;

/// A navigation the shell performs on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub to: &'static str,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl Navigation {
    pub fn replace(to: &'static str) -> Self {
        Navigation { to, replace: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    /// Session still resolving: show the progress indicator.
    Pending,
    Redirect(Navigation),
    Render,
}

impl GateOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Pending => "pending",
            GateOutcome::Redirect(_) => "redirect",
            GateOutcome::Render => "render",
        }
    }
}

/// Gate for visitor-only pages (sign-in, registration).
pub fn public_route(session: &SessionState) -> GateOutcome {
    if session.loading {
        return GateOutcome::Pending;
    }
    match session.profile {
        Some(_) => GateOutcome::Redirect(Navigation::replace(ROOT_PATH)),
        None => GateOutcome::Render,
    }
}

/// Gate applied by the protected layout to every page nested under it.
pub fn protected_layout(session: &SessionState, page: Page) -> GateOutcome {
    if session.loading {
        return GateOutcome::Pending;
    }
    match &session.profile {
        None => GateOutcome::Redirect(Navigation::replace(LOGIN_PATH)),
        Some(profile) if !page.visible_to(profile.role) => {
            GateOutcome::Redirect(Navigation::replace(ROOT_PATH))
        }
        Some(_) => GateOutcome::Render,
    }
}

/// Dispatches on the route's access class.
pub fn decide(route: &RouteMatch, session: &SessionState) -> GateOutcome {
    match route.access {
        Access::VisitorOnly => public_route(session),
        Access::Unconditional => GateOutcome::Render,
        Access::Protected => protected_layout(session, route.page),
    }
}
