//! Bearer-token session shared by every list view.
//!
//! The session is started after a successful login, read by the fetch client
//! on every request and cleared on logout. List controllers only read it.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Supplies the bearer token attached to outgoing requests.
pub trait TokenSource {
    /// Current token, or `None` when no session is active.
    fn bearer_token(&self) -> Option<String>;
}

impl<T: TokenSource + ?Sized> TokenSource for Arc<T> {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }
}

/// A token that never changes, e.g. one passed on the command line.
#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.trim().is_empty()))
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

static GLOBAL_SESSION: LazyLock<AuthSession> = LazyLock::new(AuthSession::new);

/// Cloneable handle on the current bearer token.
#[derive(Clone, Debug, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide session used by the binary.
    pub fn global() -> &'static AuthSession {
        &GLOBAL_SESSION
    }

    /// Starts a session with `token`, replacing any previous one.
    pub fn start(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token.into());
        log::info!("Session started");
    }

    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            log::info!("Session cleared");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl TokenSource for AuthSession {
    fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
