//! In-memory session store: the single current-user slot per browser session.
//!
//! A session is created at login, looked up on every request through the
//! auth extractors, and removed at logout or when the backend answers 401.

use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::models::User;

const TOKEN_LEN: usize = 32;

/// Longest session lifetime the store accepts.
pub const MAX_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session ttl {0:?} is out of range (max {max:?})", max = MAX_TTL)]
    TtlOutOfRange(Duration),

    #[error("session expiry overflows the calendar")]
    ExpiryOverflow,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    /// Bearer token issued by the backend for this user.
    pub backend_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Result<Self, SessionError> {
        if ttl.is_zero() || ttl > MAX_TTL {
            return Err(SessionError::TtlOutOfRange(ttl));
        }
        let ttl = chrono::Duration::from_std(ttl).map_err(|_| SessionError::TtlOutOfRange(ttl))?;
        Ok(Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        })
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Stores a new session and returns its opaque token.
    pub fn create(&self, user: User, backend_token: String) -> Result<String, SessionError> {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(SessionError::ExpiryOverflow)?;
        let session = Session {
            user,
            backend_token,
            created_at: now,
            expires_at,
        };

        tracing::debug!(user_id = %session.user.id, expires_at = %session.expires_at, "Session created");
        self.write().insert(token.clone(), session);
        Ok(token)
    }

    /// Returns the live session for `token`. Expired sessions are evicted.
    pub fn get(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        let session = self.read().get(token).cloned()?;
        if session.is_expired(now) {
            tracing::info!(user_id = %session.user.id, "Session expired");
            self.write().remove(token);
            return None;
        }
        Some(session)
    }

    pub fn user(&self, token: &str) -> Option<User> {
        self.get(token).map(|s| s.user)
    }

    /// Replaces the cached user of a live session, e.g. after the backend
    /// reports a role change.
    pub fn refresh_user(&self, token: &str, user: User) -> bool {
        match self.write().get_mut(token) {
            Some(session) => {
                session.user = user;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.write().remove(token)
    }

    /// Drops every expired session and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn insert_raw(&self, token: &str, session: Session) {
        self.write().insert(token.to_string(), session);
    }

    // Poisoning only happens if a writer panicked mid-update; the map is
    // still structurally valid, so keep serving it.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Session>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
