use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::{Profile, SessionState};

/// Reactive holder of the session state.
///
/// Clones share the same channel. Subscribers are notified on every change and
/// read the latest value; intermediate values may be skipped.
#[derive(Clone)]
pub struct AuthContext {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    /// Starts in the resolving state.
    pub fn new() -> Self {
        Self::with_state(SessionState::resolving())
    }

    pub fn with_state(state: SessionState) -> Self {
        let (tx, _rx) = watch::channel(state);
        AuthContext { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Marks a new resolution cycle. The previous profile is kept but hidden by the flag.
    pub fn begin_resolution(&self) {
        self.tx.send_if_modified(|state| {
            if state.loading {
                false
            } else {
                state.loading = true;
                true
            }
        });
    }

    /// Publishes the outcome of a resolution cycle.
    pub fn finish_resolution(&self, profile: Option<Profile>) {
        debug!(
            event_name = "session.resolution.finished",
            event_domain = "session",
            authenticated = profile.is_some(),
            "session resolution finished"
        );
        self.tx.send_replace(SessionState {
            loading: false,
            profile,
        });
    }

    pub fn sign_out(&self) {
        self.finish_resolution(None);
    }
}
