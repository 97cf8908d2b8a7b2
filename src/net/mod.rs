//! Networking modules for the identity API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP calls and the mockable [`api::IdentityApi`] seam;
//! `types` defines the shared wire schema and error taxonomy.

pub mod api;
pub mod types;
