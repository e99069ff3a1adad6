//! Browser Session Store

use checkout_core::{AUTH_TOKEN_KEY, SessionStore};

/// `window.localStorage`, as seen by the session guard
pub struct BrowserSession;

impl BrowserSession {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Persist the auth token. Returns `false` when storage is unavailable.
    pub fn sign_in(token: &str) -> bool {
        Self::storage()
            .map(|s| s.set_item(AUTH_TOKEN_KEY, token).is_ok())
            .unwrap_or(false)
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }
}
