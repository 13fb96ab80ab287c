//! Admin session token storage.
//!
//! The store is process-scoped and never written to disk: when `uadm` exits the
//! token is gone, so a stale admin session cannot come back on the next run.
//! Clones share the same slot, which is how one session context is handed to
//! both the API client and the application state.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Opaque bearer token issued by the backend after an admin login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Single-slot token store shared by every component of one session.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    slot: Arc<RwLock<Option<SessionToken>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token`, replacing any previous one.
    pub fn set(&self, token: SessionToken) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn get(&self) -> Option<SessionToken> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes the token. Clearing an empty store is a no-op.
    ///
    /// Returns the token that was held, if any.
    pub fn clear(&self) -> Option<SessionToken> {
        self.slot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn is_active(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
