//! Durable bearer-token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session mirrors its token here so a restarted process can resume
//! without logging in again. Only the token is ever stored; the profile is
//! re-fetched on every resume.
//!
//! ERROR HANDLING
//! ==============
//! The interface is infallible. Implementations absorb their own I/O
//! failures and log them at warn level; callers never branch on storage
//! errors.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

// =============================================================================
// TRAIT
// =============================================================================

/// A single-slot durable mirror of the session token.
pub trait TokenStore: Send + Sync {
    /// Read the mirrored token, if one is stored.
    fn load(&self) -> Option<String>;

    /// Write or overwrite the mirror.
    fn save(&self, token: &str);

    /// Remove the mirror. A no-op when nothing is stored.
    fn clear(&self);
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-memory store for tests and hosts that handle durability elsewhere.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        match self.slot.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, token: &str) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = Some(token.to_owned()),
            Err(poisoned) => *poisoned.into_inner() = Some(token.to_owned()),
        }
    }

    fn clear(&self) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }
}

// =============================================================================
// FILE
// =============================================================================

/// One-token-per-file store, the native analog of a browser storage slot.
///
/// Reads trim surrounding whitespace and treat an empty file as no token.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() { None } else { Some(token.to_owned()) }
            }
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(error = %e, path = %self.path.display(), "token read failed");
                }
                None
            }
        }
    }

    fn save(&self, token: &str) {
        if let Err(e) = fs::write(&self.path, token) {
            tracing::warn!(error = %e, path = %self.path.display(), "token write failed");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, path = %self.path.display(), "token clear failed"),
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
