//! Wire DTOs and errors for the identity API.
//!
//! DESIGN
//! ======
//! These types mirror the server's token and user payloads so serde
//! round-trips stay lossless. Timestamps stay ISO 8601 strings; nothing
//! client-side does date math on them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or failed mid-flight.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success HTTP status.
    #[error("status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// A success response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// `true` when the server rejected the caller's credential outright.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// A user account as returned by the identity endpoints.
///
/// Anonymous accounts carry no email and are never verified. Registration
/// upgrades the same record in place, so `id` is stable across the upgrade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email; `None` for anonymous accounts.
    pub email: Option<String>,
    /// Whether the account has completed registration.
    pub is_verified: bool,
    /// Administrative flag, passed through unmodified.
    pub is_superuser: bool,
    /// Creation timestamp (ISO 8601 string).
    pub created_at: String,
}

impl User {
    /// `true` for accounts created by `POST /users/` that have not been
    /// upgraded through registration.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.email.is_none()
    }
}

/// Token envelope returned by every credential-granting endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer credential for subsequent requests.
    pub access_token: String,
    /// Token scheme; the server always sends `"bearer"`.
    pub token_type: String,
    /// The account the token authenticates.
    pub user: User,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
