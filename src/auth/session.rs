// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session and account store contract.
//!
//! The authoriser consults a [`SessionStore`] once a token's signature has
//! been verified. Production deployments back this with their own database;
//! [`InMemorySessionStore`] serves the development server and tests.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use super::response::AuthoriserResponse;
use crate::token::Subject;

/// Outcome of a session lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Session exists, is live, and the account is active
    Active,
    /// Account has been deactivated
    AccountInactive,
    /// Session exists but does not belong to this principal
    Unverified,
    /// Session has expired
    Expired,
    /// No such session
    Missing,
}

impl SessionStatus {
    /// Verdict for a failed lookup, `None` when the session is active.
    pub fn failure(self) -> Option<AuthoriserResponse> {
        match self {
            SessionStatus::Active => None,
            SessionStatus::AccountInactive => Some(AuthoriserResponse::AccountInactive),
            SessionStatus::Unverified => Some(AuthoriserResponse::SessionUnverified),
            SessionStatus::Expired => Some(AuthoriserResponse::SessionExpired),
            SessionStatus::Missing => Some(AuthoriserResponse::SessionMissing),
        }
    }
}

/// Looks up session and account state for a verified token.
pub trait SessionStore: Send + Sync {
    fn lookup(&self, subject: Subject, user_id: &str, session_id: &str) -> SessionStatus;
}

#[derive(Debug, Clone)]
struct SessionRecord {
    subject: Subject,
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    inactive_accounts: RwLock<HashSet<String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session and return its ID.
    ///
    /// Sessions that have already expired are dropped on the way.
    pub fn create_session(&self, subject: Subject, user_id: &str, ttl: Duration) -> String {
        self.create_session_at(subject, user_id, ttl, Utc::now())
    }

    fn create_session_at(
        &self,
        subject: Subject,
        user_id: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> String {
        let session_id = format!("sess_{}", uuid::Uuid::new_v4().simple());
        let record = SessionRecord {
            subject,
            user_id: user_id.to_string(),
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, existing| existing.expires_at > now);
        sessions.insert(session_id.clone(), record);
        session_id
    }

    /// Remove a session. Returns whether it existed.
    pub fn revoke_session(&self, session_id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
            .is_some()
    }

    pub fn deactivate_account(&self, user_id: &str) {
        self.inactive_accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id.to_string());
    }

    pub fn reactivate_account(&self, user_id: &str) {
        self.inactive_accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(user_id);
    }

    fn lookup_at(
        &self,
        subject: Subject,
        user_id: &str,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> SessionStatus {
        if self
            .inactive_accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
        {
            return SessionStatus::AccountInactive;
        }

        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        match sessions.get(session_id) {
            None => SessionStatus::Missing,
            Some(record) if record.subject != subject || record.user_id != user_id => {
                SessionStatus::Unverified
            }
            Some(record) if record.expires_at <= now => SessionStatus::Expired,
            Some(_) => SessionStatus::Active,
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn lookup(&self, subject: Subject, user_id: &str, session_id: &str) -> SessionStatus {
        self.lookup_at(subject, user_id, session_id, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_session_is_active() {
        let store = InMemorySessionStore::new();
        let sid = store.create_session(Subject::Actor, "user_123", Duration::hours(1));
        assert!(sid.starts_with("sess_"));
        assert_eq!(
            store.lookup(Subject::Actor, "user_123", &sid),
            SessionStatus::Active
        );
    }

    #[test]
    fn unknown_or_revoked_session_is_missing() {
        let store = InMemorySessionStore::new();
        assert_eq!(
            store.lookup(Subject::Actor, "user_123", "sess_nope"),
            SessionStatus::Missing
        );

        let sid = store.create_session(Subject::Actor, "user_123", Duration::hours(1));
        assert!(store.revoke_session(&sid));
        assert!(!store.revoke_session(&sid));
        assert_eq!(
            store.lookup(Subject::Actor, "user_123", &sid),
            SessionStatus::Missing
        );
    }

    #[test]
    fn foreign_session_is_unverified() {
        let store = InMemorySessionStore::new();
        let sid = store.create_session(Subject::Actor, "user_123", Duration::hours(1));
        assert_eq!(
            store.lookup(Subject::Actor, "user_456", &sid),
            SessionStatus::Unverified
        );
        assert_eq!(
            store.lookup(Subject::Admin, "user_123", &sid),
            SessionStatus::Unverified
        );
    }

    #[test]
    fn elapsed_session_is_expired() {
        let store = InMemorySessionStore::new();
        let sid = store.create_session(Subject::Admin, "op_1", Duration::minutes(5));
        let later = Utc::now() + Duration::minutes(10);
        assert_eq!(
            store.lookup_at(Subject::Admin, "op_1", &sid, later),
            SessionStatus::Expired
        );
    }

    #[test]
    fn expired_sessions_are_pruned_on_create() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();
        let stale = store.create_session_at(Subject::Actor, "user_123", Duration::minutes(5), now);
        let live = store.create_session_at(Subject::Actor, "user_123", Duration::hours(1), now);

        let later = now + Duration::minutes(10);
        let fresh = store.create_session_at(Subject::Admin, "op_1", Duration::hours(1), later);

        assert_eq!(
            store.lookup_at(Subject::Actor, "user_123", &stale, later),
            SessionStatus::Missing
        );
        assert_eq!(
            store.lookup_at(Subject::Actor, "user_123", &live, later),
            SessionStatus::Active
        );
        assert_eq!(
            store.lookup_at(Subject::Admin, "op_1", &fresh, later),
            SessionStatus::Active
        );
        assert_eq!(store.sessions.read().unwrap().len(), 2);
    }

    #[test]
    fn oversized_ttl_saturates() {
        let store = InMemorySessionStore::new();
        let sid = store.create_session(Subject::Actor, "user_123", Duration::MAX);
        assert_eq!(
            store.lookup(Subject::Actor, "user_123", &sid),
            SessionStatus::Active
        );
    }

    #[test]
    fn inactive_account_wins() {
        let store = InMemorySessionStore::new();
        let sid = store.create_session(Subject::Actor, "user_123", Duration::hours(1));
        store.deactivate_account("user_123");
        assert_eq!(
            store.lookup(Subject::Actor, "user_123", &sid),
            SessionStatus::AccountInactive
        );

        store.reactivate_account("user_123");
        assert_eq!(
            store.lookup(Subject::Actor, "user_123", &sid),
            SessionStatus::Active
        );
    }

    #[test]
    fn statuses_map_to_verdicts() {
        assert_eq!(SessionStatus::Active.failure(), None);
        assert_eq!(
            SessionStatus::Missing.failure(),
            Some(AuthoriserResponse::SessionMissing)
        );
        assert_eq!(
            SessionStatus::AccountInactive.failure(),
            Some(AuthoriserResponse::AccountInactive)
        );
    }
}
