//! Client-held authentication state.

pub mod session;
