//! The auth context: who the visitor is and whether that is known yet.
//!
//! Session state is published through a `watch` channel so that every consumer
//! (the HTTP handlers, live views) recomputes when it changes.

pub mod auth;
pub mod context;
pub mod plain_provider;
pub mod provider;
pub mod supabase_provider;

pub use auth::Auth;
pub use context::AuthContext;
pub use provider::{create_session_provider, ProviderConfig, SessionProvider};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace roles as stored in the backend's `profiles` table.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Lojista,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Lojista => "lojista",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated visitor's profile.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
}

impl Profile {
    /// Name shown in the layout; falls back to the email.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Snapshot of the auth context.
///
/// While `loading` is true the profile must not be trusted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub loading: bool,
    pub profile: Option<Profile>,
}

impl SessionState {
    /// Initial state: resolution has not finished.
    pub fn resolving() -> Self {
        SessionState {
            loading: true,
            profile: None,
        }
    }

    pub fn anonymous() -> Self {
        SessionState {
            loading: false,
            profile: None,
        }
    }

    pub fn authenticated(profile: Profile) -> Self {
        SessionState {
            loading: false,
            profile: Some(profile),
        }
    }

    /// The profile, only once resolution has finished.
    pub fn resolved_profile(&self) -> Option<&Profile> {
        if self.loading {
            None
        } else {
            self.profile.as_ref()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{Profile, Role};

    pub fn profile(role: Role) -> Profile {
        Profile {
            id: format!("{}-id", role),
            email: format!("{}@example.com", role),
            name: None,
            role,
        }
    }
}
