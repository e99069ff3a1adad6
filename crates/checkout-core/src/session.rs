//! Session Guard
//!
//! Decides whether a visitor may see the checkout page or must be sent to
//! the login screen. Only the presence of a stored token is consulted.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Storage key holding the auth token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Route unauthenticated visitors are redirected to
pub const LOGIN_ROUTE: &str = "/login";

/// Key-value session storage (browser `localStorage`, in-memory, ...)
pub trait SessionStore {
    /// Read a stored value
    fn get(&self, key: &str) -> Option<String>;

    /// Stored auth token, if any
    fn token(&self) -> Option<String> {
        self.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }
}

/// Outcome of the session check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Authenticated,
    RedirectToLogin,
}

impl SessionOutcome {
    /// Navigation target, if the visitor has to leave the page
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            SessionOutcome::Authenticated => None,
            SessionOutcome::RedirectToLogin => Some(LOGIN_ROUTE),
        }
    }
}

/// Token-presence check run when the checkout page mounts
pub struct SessionGuard;

impl SessionGuard {
    pub fn resolve<S: SessionStore + ?Sized>(store: &S) -> SessionOutcome {
        if store.token().is_some() {
            SessionOutcome::Authenticated
        } else {
            tracing::debug!("No session token, redirecting to {}", LOGIN_ROUTE);
            SessionOutcome::RedirectToLogin
        }
    }
}

/// In-memory session store (for tests and native callers)
#[derive(Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with an auth token
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set(AUTH_TOKEN_KEY, token);
        store
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
