//! Navigation guard — session-aware route access decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host application owns the routing table and URL matching. It calls
//! [`RouteGuard::before_navigation`] with the target route's metadata before
//! completing any navigation and applies the returned decision. The guard
//! re-evaluates live session state on every call and caches nothing.

use crate::state::session::Session;

// =============================================================================
// ROUTE METADATA
// =============================================================================

/// Access class of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    /// Reachable regardless of session state.
    Public,
    /// Requires an authenticated session; others are sent to login.
    RequiresAuth,
    /// Login/register entry points; authenticated sessions are sent away.
    GuestOnly,
}

/// Host-provided description of a navigation target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    /// Route name, echoed in logs.
    pub name: String,
    /// Access class checked by the guard.
    pub access: RouteAccess,
}

impl RouteMeta {
    #[must_use]
    pub fn new(name: &str, access: RouteAccess) -> Self {
        Self { name: name.to_owned(), access }
    }
}

/// Outcome of a guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Complete the navigation to the requested route.
    Proceed,
    /// Navigate to this route instead.
    Redirect(String),
}

// =============================================================================
// GUARD
// =============================================================================

/// Evaluates route access against the session before each navigation.
pub struct RouteGuard {
    login_route: String,
    landing_route: String,
}

impl RouteGuard {
    /// `login_route` receives unauthenticated visitors of protected routes;
    /// `landing_route` receives authenticated visitors of guest-only routes.
    #[must_use]
    pub fn new(login_route: &str, landing_route: &str) -> Self {
        Self {
            login_route: login_route.to_owned(),
            landing_route: landing_route.to_owned(),
        }
    }

    /// Decide whether the navigation to `target` may proceed.
    ///
    /// Hydrates the profile first when a token is held without one (a fresh
    /// process resuming from a stored token). A failed hydration has already
    /// degraded the session to logged-out by the time the access rules run,
    /// so protected routes fall through to the login redirect.
    pub async fn before_navigation(&self, session: &mut Session, target: &RouteMeta) -> GuardDecision {
        if session.token().is_some() && session.user().is_none() {
            session.fetch_user().await;
        }

        match target.access {
            RouteAccess::RequiresAuth if !session.is_authenticated() => {
                tracing::debug!(route = %target.name, "unauthenticated, redirecting to login");
                GuardDecision::Redirect(self.login_route.clone())
            }
            RouteAccess::GuestOnly if session.is_authenticated() => {
                tracing::debug!(route = %target.name, "already authenticated, redirecting to landing");
                GuardDecision::Redirect(self.landing_route.clone())
            }
            _ => GuardDecision::Proceed,
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
