//! Client-side auth session management for a token-based identity API.
//!
//! This crate owns the full client token lifecycle: login, registration by
//! anonymous-account upgrade, profile hydration, durable token mirroring,
//! and session-aware route guarding. Hosts construct one [`Session`] from an
//! [`IdentityApi`] implementation and a [`TokenStore`], keep it for the
//! process lifetime, and consult a [`RouteGuard`] before navigations.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`net`] | Wire DTOs, error taxonomy, and the HTTP identity client |
//! | [`storage`] | Durable single-slot token stores (memory, file) |
//! | [`state`] | The [`Session`] state machine |
//! | [`guard`] | Route access decisions evaluated against the session |

pub mod guard;
pub mod net;
pub mod state;
pub mod storage;

pub use guard::{GuardDecision, RouteAccess, RouteGuard, RouteMeta};
pub use net::api::{IdentityApi, IdentityClient};
pub use net::types::{ApiError, TokenResponse, User};
pub use state::session::Session;
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
