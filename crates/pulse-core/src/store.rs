//! In-memory user and session store.
//!
//! Users and sessions live for the process lifetime; per-user session
//! collections are append-only and keep insertion order. Reading a user's
//! sessions requires at least one recorded session ("strict existence"): a
//! registered user with none is indistinguishable from an unknown user.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{PulseError, Result};
use crate::session::Session;
use crate::types::User;

#[derive(Debug, Default)]
pub struct ActivityStore {
    users: HashMap<String, User>,
    sessions: HashMap<String, Vec<Session>>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user. Fails with `DuplicateKey` if the id is taken.
    pub fn register_user(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<()> {
        let id = id.into();
        if self.users.contains_key(&id) {
            return Err(PulseError::DuplicateKey(id));
        }
        debug!(user_id = %id, "registering user");
        let user = User::new(id.clone(), name);
        self.users.insert(id, user);
        Ok(())
    }

    /// Append a session for a registered user.
    ///
    /// The user must exist and the interval must not be inverted; nothing is
    /// written otherwise. Exact duplicates are legal — deduplication is the
    /// merge engine's job, not the store's.
    pub fn record_session(
        &mut self,
        user_id: &str,
        login_time: NaiveDateTime,
        logout_time: NaiveDateTime,
    ) -> Result<()> {
        if !self.users.contains_key(user_id) {
            return Err(PulseError::NotFound(format!("User not found: {user_id}")));
        }
        let session = Session::new(login_time, logout_time)?;
        debug!(user_id = %user_id, login = %login_time, logout = %logout_time, "recording session");
        self.sessions
            .entry(user_id.to_string())
            .or_default()
            .push(session);
        Ok(())
    }

    /// Look up a user by id.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// All sessions recorded for a user, in insertion order.
    ///
    /// Fails with `NotFound` unless at least one session has been recorded,
    /// even if the user itself is registered.
    pub fn sessions(&self, user_id: &str) -> Result<&[Session]> {
        self.sessions
            .get(user_id)
            .map(Vec::as_slice)
            .ok_or_else(|| PulseError::NotFound(format!("No sessions found for user: {user_id}")))
    }

    /// Iterate `(user_id, sessions)` over every user with at least one
    /// recorded session. Iteration order is unspecified.
    pub fn users_with_sessions(&self) -> impl Iterator<Item = (&str, &[Session])> {
        self.sessions
            .iter()
            .map(|(id, sessions)| (id.as_str(), sessions.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_register_duplicate_user_fails() {
        let mut store = ActivityStore::new();
        store.register_user("alice", "Alice").unwrap();
        let err = store.register_user("alice", "Alice Again").unwrap_err();
        assert!(matches!(err, PulseError::DuplicateKey(id) if id == "alice"));
        // The original registration is untouched.
        assert_eq!(store.user("alice").unwrap().name, "Alice");
    }

    #[test]
    fn test_record_session_for_unknown_user_fails() {
        let mut store = ActivityStore::new();
        let err = store
            .record_session("ghost", at("2024-03-01T09:00:00"), at("2024-03-01T10:00:00"))
            .unwrap_err();
        assert!(matches!(err, PulseError::NotFound(_)));
    }

    #[test]
    fn test_invalid_interval_writes_nothing() {
        let mut store = ActivityStore::new();
        store.register_user("alice", "Alice").unwrap();
        let err = store
            .record_session("alice", at("2024-03-01T10:00:00"), at("2024-03-01T09:00:00"))
            .unwrap_err();
        assert!(matches!(err, PulseError::InvalidInterval { .. }));
        // Strict existence still holds: no session collection was created.
        assert!(store.sessions("alice").is_err());
    }

    #[test]
    fn test_registered_user_without_sessions_is_not_found() {
        let mut store = ActivityStore::new();
        store.register_user("alice", "Alice").unwrap();
        assert!(store.user("alice").is_some());
        let err = store.sessions("alice").unwrap_err();
        assert!(matches!(err, PulseError::NotFound(_)));
    }

    #[test]
    fn test_sessions_keep_insertion_order_and_duplicates() {
        let mut store = ActivityStore::new();
        store.register_user("alice", "Alice").unwrap();
        let login = at("2024-03-01T09:00:00");
        let logout = at("2024-03-01T10:00:00");
        store.record_session("alice", login, logout).unwrap();
        store.record_session("alice", login, logout).unwrap();
        store
            .record_session("alice", at("2024-03-01T08:00:00"), at("2024-03-01T08:30:00"))
            .unwrap();

        let sessions = store.sessions("alice").unwrap();
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0], sessions[1]);
        // Not sorted by the store; consumers sort.
        assert!(sessions[2].login_time() < sessions[0].login_time());
    }

    #[test]
    fn test_users_with_sessions_skips_sessionless_users() {
        let mut store = ActivityStore::new();
        store.register_user("alice", "Alice").unwrap();
        store.register_user("bob", "Bob").unwrap();
        store
            .record_session("alice", at("2024-03-01T09:00:00"), at("2024-03-01T10:00:00"))
            .unwrap();

        let ids: Vec<&str> = store.users_with_sessions().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["alice"]);
    }
}
