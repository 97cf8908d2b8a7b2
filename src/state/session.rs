//! Auth session — token lifecycle and account state transitions.
//!
//! DESIGN
//! ======
//! One `Session` instance owns the caller's authentication state: the bearer
//! token, the loaded profile, and the durable token mirror. All operations
//! take `&mut self`; there is no interior mutability and no global instance.
//! Registration upgrades an anonymous account in two phases and commits the
//! grant only after the upgrade succeeds, so a failed attempt leaves no
//! trace in memory or storage.
//!
//! ERROR HANDLING
//! ==============
//! `login` and `register` surface their [`ApiError`]s. `fetch_user` never
//! does: any failure there means the held token is useless, and the session
//! degrades to logged-out instead of wedging half-authenticated.

use std::sync::Arc;

use crate::net::api::IdentityApi;
use crate::net::types::{ApiError, TokenResponse, User};
use crate::storage::TokenStore;

// =============================================================================
// SESSION
// =============================================================================

/// Client authentication state: bearer token + loaded profile.
pub struct Session {
    api: Arc<dyn IdentityApi>,
    store: Arc<dyn TokenStore>,
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Create a session, seeding the token from the durable store.
    ///
    /// The profile is never persisted, so a freshly constructed session with
    /// a stored token is not yet authenticated; call [`Session::fetch_user`]
    /// to hydrate it.
    #[must_use]
    pub fn new(api: Arc<dyn IdentityApi>, store: Arc<dyn TokenStore>) -> Self {
        let token = store.load();
        Self { api, store, token, user: None }
    }

    /// Bearer token currently held, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Profile currently loaded, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// `true` iff both a token and a profile are present.
    ///
    /// Derived on every call, never stored. A token alone (for example right
    /// after construction from a stored token) does not count.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Authenticate with email + password.
    ///
    /// On success the grant is committed: token and profile installed, token
    /// mirrored to the durable store. On failure the session is untouched.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the login endpoint; 401 means the
    /// credentials were rejected.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let grant = self.api.login(email, password).await?;
        tracing::info!(user_id = %grant.user.id, "login succeeded");
        self.commit(grant);
        Ok(())
    }

    /// Register a new account by upgrading a fresh anonymous one.
    ///
    /// Phase one creates an anonymous account and holds its grant in locals.
    /// Phase two upgrades that account with the submitted credentials, using
    /// the phase-one token as bearer. Only a successful upgrade commits
    /// anything: a failure in either phase leaves the session and the
    /// durable store exactly as they were, and the phase-one token never
    /// reaches either.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the failing phase; 409 means the email
    /// is already registered.
    pub async fn register(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let anon = self.api.create_anonymous().await?;

        match self.api.register(email, password, &anon.access_token).await {
            Ok(grant) => {
                tracing::info!(user_id = %grant.user.id, "registration succeeded");
                self.commit(grant);
                Ok(())
            }
            Err(e) => {
                // The server keeps the orphaned anonymous account; there is
                // no endpoint to remove it.
                tracing::warn!(
                    error = %e,
                    anon_user_id = %anon.user.id,
                    "registration upgrade failed, anonymous account abandoned"
                );
                Err(e)
            }
        }
    }

    /// Fetch the profile for the held token.
    ///
    /// Self-healing: a missing token or any fetch failure degrades to a full
    /// [`Session::logout`] rather than surfacing an error, so a stale stored
    /// token cannot wedge the caller in a half-authenticated state.
    pub async fn fetch_user(&mut self) {
        let Some(token) = self.token.clone() else {
            self.logout();
            return;
        };

        match self.api.fetch_me(&token).await {
            Ok(user) => self.user = Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed, clearing session");
                self.logout();
            }
        }
    }

    /// Clear the token, the profile, and the durable mirror.
    ///
    /// Unconditional and idempotent; never fails.
    pub fn logout(&mut self) {
        tracing::debug!("session cleared");
        self.token = None;
        self.user = None;
        self.store.clear();
    }

    /// Transport hook for authenticated app traffic outside the credential
    /// endpoints. A 401 there means the held token has expired server-side:
    /// the session logs out and `true` is returned so the caller can route
    /// to the login entry point. Any other error leaves the session alone.
    pub fn expire_if_unauthorized(&mut self, error: &ApiError) -> bool {
        if error.is_unauthorized() {
            tracing::warn!("server rejected the held token, clearing session");
            self.logout();
            return true;
        }
        false
    }

    fn commit(&mut self, grant: TokenResponse) {
        self.store.save(&grant.access_token);
        self.token = Some(grant.access_token);
        self.user = Some(grant.user);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
