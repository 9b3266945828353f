// ── Bearer credential storage ──
//
// One token slot shared by every request the gateway issues. The slot is
// read before each request and cleared centrally when the backend answers
// 401, so a stale credential is never re-sent.

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::watch;

/// Lock-free slot holding the bearer token, plus a revocation broadcast.
///
/// Outer layers (a login screen, a CLI prompt) subscribe to revocations and
/// force re-authentication when the counter bumps. The data layer itself
/// never navigates anywhere -- it only signals.
pub struct CredentialStore {
    token: ArcSwapOption<SecretString>,
    revocations: watch::Sender<u64>,
}

impl CredentialStore {
    pub fn new() -> Self {
        let (revocations, _) = watch::channel(0u64);
        Self {
            token: ArcSwapOption::empty(),
            revocations,
        }
    }

    /// Install a credential. Replaces any existing one.
    pub fn set_token(&self, token: SecretString) {
        self.token.store(Some(Arc::new(token)));
    }

    /// The current `Authorization` header value, if a credential is held.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .load()
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    pub fn has_token(&self) -> bool {
        self.token.load().is_some()
    }

    /// Drop the credential without signalling. Used at sign-out.
    pub fn clear(&self) {
        self.token.store(None);
    }

    /// Drop the credential and broadcast a session-revoked event.
    /// Called by the gateway on every 401 response.
    pub fn revoke(&self) {
        self.token.store(None);
        self.revocations.send_modify(|n| *n += 1);
    }

    /// Subscribe to revocation events. The value is a monotonic counter;
    /// any change means the session ended and the user must sign in again.
    pub fn subscribe_revocations(&self) -> watch::Receiver<u64> {
        self.revocations.subscribe()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
