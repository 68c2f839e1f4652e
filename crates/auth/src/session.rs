use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::SessionId;

use crate::{AdminAccount, AdminCredentials};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session expired")]
    SessionExpired,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("forbidden: role `{0}` cannot access the admin panel")]
    Forbidden(String),
}

/// A logged-in admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub session_id: SessionId,
    pub account: AdminAccount,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn issue(account: AdminAccount, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            session_id: SessionId::new(),
            account,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Checks logins against the configured admin and vets presented sessions.
///
/// Session storage is the caller's concern.
#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: AdminCredentials,
    account: AdminAccount,
    session_ttl: Duration,
}

impl Authenticator {
    pub fn new(credentials: AdminCredentials, account: AdminAccount, session_ttl: Duration) -> Self {
        Self {
            credentials,
            account,
            session_ttl,
        }
    }

    pub fn account(&self) -> &AdminAccount {
        &self.account
    }

    pub fn login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, AuthError> {
        if !self.credentials.verify(email, password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(AdminSession::issue(self.account.clone(), now, self.session_ttl))
    }

    /// Gate for admin-only operations.
    pub fn authorize<'s>(
        &self,
        session: Option<&'s AdminSession>,
        now: DateTime<Utc>,
    ) -> Result<&'s AdminAccount, AuthError> {
        let session = session.ok_or(AuthError::NotAuthenticated)?;
        if session.is_expired(now) {
            return Err(AuthError::SessionExpired);
        }
        if !session.account.role.is_admin() {
            return Err(AuthError::Forbidden(session.account.role.to_string()));
        }
        Ok(&session.account)
    }
}
