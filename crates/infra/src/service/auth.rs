use chrono::{DateTime, Utc};

use storefront_auth::{AdminAccount, AdminSession, AuthError, Authenticator};
use storefront_core::SessionId;

use super::ServiceError;
use crate::repository::SessionStore;

/// Simulated admin login backed by a [`SessionStore`].
#[derive(Debug)]
pub struct AuthService<S> {
    authenticator: Authenticator,
    sessions: S,
}

impl<S> AuthService<S>
where
    S: SessionStore,
{
    pub fn new(authenticator: Authenticator, sessions: S) -> Self {
        Self {
            authenticator,
            sessions,
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<AdminSession, ServiceError> {
        self.login_at(email, password, Utc::now())
    }

    pub fn login_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, ServiceError> {
        let session = self
            .authenticator
            .login(email, password, now)
            .inspect_err(|_| tracing::warn!(email = %email.trim(), "admin login failed"))?;

        self.sessions.purge_expired(now)?;
        self.sessions.put(session.clone())?;
        tracing::info!(
            session_id = %session.session_id,
            expires_at = %session.expires_at,
            "admin logged in"
        );
        Ok(session)
    }

    /// Returns whether a session was actually ended.
    pub fn logout(&self, session_id: SessionId) -> Result<bool, ServiceError> {
        let removed = self.sessions.remove(session_id)?.is_some();
        if removed {
            tracing::info!(session_id = %session_id, "admin logged out");
        }
        Ok(removed)
    }

    pub fn current_user(&self, session_id: SessionId) -> Option<AdminAccount> {
        self.current_user_at(session_id, Utc::now())
    }

    /// Expired sessions are evicted on lookup; storage failures read as logged out.
    pub fn current_user_at(&self, session_id: SessionId, now: DateTime<Utc>) -> Option<AdminAccount> {
        self.require_admin_at(Some(session_id), now).ok()
    }

    pub fn is_authenticated(&self, session_id: SessionId) -> bool {
        self.current_user(session_id).is_some()
    }

    pub fn require_admin(&self, session_id: Option<SessionId>) -> Result<AdminAccount, ServiceError> {
        self.require_admin_at(session_id, Utc::now())
    }

    pub fn require_admin_at(
        &self,
        session_id: Option<SessionId>,
        now: DateTime<Utc>,
    ) -> Result<AdminAccount, ServiceError> {
        let session = match session_id {
            Some(id) => self.sessions.get(id)?,
            None => None,
        };
        match self.authenticator.authorize(session.as_ref(), now) {
            Ok(account) => Ok(account.clone()),
            Err(AuthError::SessionExpired) => {
                if let Some(id) = session_id {
                    self.sessions.remove(id)?;
                    tracing::debug!(session_id = %id, "evicted expired admin session");
                }
                Err(AuthError::SessionExpired.into())
            }
            Err(err) => Err(err.into()),
        }
    }
}
