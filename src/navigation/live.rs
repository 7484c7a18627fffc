use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::history::History;
use super::table::{Resolution, RouteTable};
use crate::gate::{self, GateOutcome};
use crate::session::SessionState;
use crate::view::View;

/// Longest redirect chain followed before giving up on a location.
const MAX_REDIRECTS: usize = 8;

/// The location the visitor ends up on and what is shown there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub location: String,
    pub view: View,
}

/// Resolves the current history entry against the table and the gate,
/// following redirects by replacing the entry.
pub fn evaluate(table: &RouteTable, history: &mut History, session: &SessionState) -> Screen {
    for _ in 0..MAX_REDIRECTS {
        let location = history.current().to_string();
        let target = match table.resolve(&location) {
            Resolution::Fallback { to } => to,
            Resolution::Matched(route) => match gate::decide(&route, session) {
                GateOutcome::Pending => {
                    return Screen {
                        location,
                        view: View::Spinner,
                    }
                }
                GateOutcome::Render => {
                    return Screen {
                        view: View::page(&route, session, table),
                        location,
                    }
                }
                GateOutcome::Redirect(nav) => nav.to,
            },
        };
        debug!("Redirecting {} -> {}", location, target);
        history.replace(target);
    }
    warn!(
        "Redirect limit reached at {}; showing progress indicator",
        history.current()
    );
    Screen {
        location: history.current().to_string(),
        view: View::Spinner,
    }
}

/// A visitor's view, recomputed whenever the session changes.
pub struct LiveView {
    table: RouteTable,
    history: History,
    session: watch::Receiver<SessionState>,
}

impl LiveView {
    pub fn new(
        table: RouteTable,
        path: impl Into<String>,
        session: watch::Receiver<SessionState>,
    ) -> Self {
        LiveView {
            table,
            history: History::new(path),
            session,
        }
    }

    /// Evaluates against the latest session state.
    pub fn current(&mut self) -> Screen {
        let session = self.session.borrow_and_update().clone();
        evaluate(&self.table, &mut self.history, &session)
    }

    /// Visitor-initiated navigation (pushes an entry).
    pub fn navigate(&mut self, path: impl Into<String>) -> Screen {
        self.history.push(path);
        self.current()
    }

    /// History back; `None` at the first entry.
    pub fn back(&mut self) -> Option<Screen> {
        if self.history.back() {
            Some(self.current())
        } else {
            None
        }
    }

    /// Waits for the next session change and re-evaluates.
    /// `None` once the auth context is gone.
    pub async fn next(&mut self) -> Option<Screen> {
        self.session.changed().await.ok()?;
        Some(self.current())
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
