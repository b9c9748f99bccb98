use std::sync::Arc;

use tokio::sync::RwLock;

use lakwatsero_shared::models::UserDetails;
use lakwatsero_shared::Masked;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Masked<String>,
    pub user: UserDetails,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }
}

/// Shared, injectable session slot. Views and gateways hold clones of the
/// same handle instead of reaching for a global.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    pub async fn current(&self) -> Option<Session> {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<Masked<String>> {
        self.inner.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn user(&self) -> Option<UserDetails> {
        self.inner.read().await.as_ref().map(|s| s.user.clone())
    }

    /// A session only counts when the user record carries an id.
    pub async fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .await
            .as_ref()
            .is_some_and(|s| !s.user.id.is_empty())
    }

    pub async fn sign_in(&self, session: Session) {
        tracing::info!("Signed in as {}", session.user.email);
        *self.inner.write().await = Some(session);
    }

    pub async fn sign_out(&self) {
        *self.inner.write().await = None;
    }
}
