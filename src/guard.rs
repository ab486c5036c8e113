//! Role-gated route guard
//!
//! Navigational gate evaluated before a protected view is shown. The guard
//! is an explicit state machine:
//!
//! ```text
//! CheckingAuth ──► Unauthenticated            (no credential; go to /login)
//!      │
//!      └────────► ResolvingRole ──► RoleKnown (cached, or one /auth/me/ call)
//!                       │                │
//!                       ▼                ├──► Authorized  (render)
//!                 Unauthenticated        └──► Forbidden   (go to role home)
//! ```
//!
//! The role is resolved at most once per evaluation and cached in the
//! session store, so later evaluations within the same session skip the
//! identity call entirely. Any failure of the identity call invalidates the
//! whole session: credentials are cleared and the user is sent to login.

use crate::auth::AuthService;
use crate::client::ApiClient;
use crate::session::Role;
use tracing::{debug, warn};

/// Login route users are redirected to when unauthenticated
pub const LOGIN_ROUTE: &str = "/login";

/// Guard evaluation states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    CheckingAuth,
    Unauthenticated,
    ResolvingRole,
    RoleKnown(Role),
    Authorized(Role),
    Forbidden(Role),
}

/// Outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected content for this role
    Render(Role),
    /// Do not render; navigate to the given route instead
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render(_))
    }
}

/// Role-gated guard for a protected route
pub struct RouteGuard<'a> {
    client: &'a ApiClient,
    allow: &'a [Role],
}

impl<'a> RouteGuard<'a> {
    /// Guard a route that only `allow` roles may render
    pub fn new(client: &'a ApiClient, allow: &'a [Role]) -> Self {
        Self { client, allow }
    }

    /// Run the state machine to a terminal decision
    pub async fn evaluate(&self) -> GuardDecision {
        let session = self.client.session();
        let mut state = GuardState::CheckingAuth;

        loop {
            state = match state {
                GuardState::CheckingAuth => {
                    if session.access_token().is_none() {
                        GuardState::Unauthenticated
                    } else if let Some(role) = session.role() {
                        // Cached role is trusted for the session lifetime
                        GuardState::RoleKnown(role)
                    } else {
                        GuardState::ResolvingRole
                    }
                }

                GuardState::ResolvingRole => match AuthService::new(self.client).me().await {
                    Ok(identity) => {
                        let role = if identity.user.is_staff {
                            Role::Staff
                        } else {
                            Role::Customer
                        };
                        session.set_role(role);
                        debug!("Resolved session role: {}", role);
                        GuardState::RoleKnown(role)
                    }
                    Err(e) => {
                        // Strict policy: a failed identity call means the
                        // session is invalid, no retry
                        warn!("Identity resolution failed ({}), invalidating session", e);
                        session.clear();
                        GuardState::Unauthenticated
                    }
                },

                GuardState::RoleKnown(role) => {
                    if self.allow.contains(&role) {
                        GuardState::Authorized(role)
                    } else {
                        GuardState::Forbidden(role)
                    }
                }

                GuardState::Unauthenticated => return GuardDecision::Redirect(LOGIN_ROUTE),
                GuardState::Authorized(role) => return GuardDecision::Render(role),
                GuardState::Forbidden(role) => {
                    return GuardDecision::Redirect(role.home_route())
                }
            };
        }
    }
}
