//! Caller-facing facade over the session store and the metric computations.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use pulse_core::{ActivityStore, Result, Session, User, YearMonth};

use crate::activity::total_activity_minutes;
use crate::inactivity;
use crate::monthly;
use crate::status::{self, UserStatus};

/// Owns the session store and exposes every query the callers and the
/// status classifier consume. All operations are synchronous and in-memory;
/// concurrent callers wrap the whole facade in a single lock.
#[derive(Debug, Default)]
pub struct UserAnalytics {
    store: ActivityStore,
}

impl UserAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user. Fails with `DuplicateKey` if the id is taken.
    pub fn register_user(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<()> {
        self.store.register_user(id, name)
    }

    /// Record a login/logout session for a registered user.
    pub fn record_session(
        &mut self,
        user_id: &str,
        login_time: NaiveDateTime,
        logout_time: NaiveDateTime,
    ) -> Result<()> {
        self.store.record_session(user_id, login_time, logout_time)
    }

    /// Look up a user by id.
    pub fn user(&self, id: &str) -> Option<&User> {
        self.store.user(id)
    }

    /// All sessions recorded for a user, in insertion order. `NotFound`
    /// unless at least one session exists.
    pub fn user_sessions(&self, user_id: &str) -> Result<&[Session]> {
        self.store.sessions(user_id)
    }

    /// Total wall-clock minutes the user was active, counting overlapping or
    /// touching sessions once and excluding gaps.
    pub fn total_activity_time(&self, user_id: &str) -> Result<i64> {
        let sessions = self.store.sessions(user_id)?;
        total_activity_minutes(sessions)
    }

    /// Per-day active minutes for the given month, keyed by session login
    /// date. Empty if no session falls in the month.
    pub fn monthly_activity_metric(
        &self,
        user_id: &str,
        month: YearMonth,
    ) -> Result<BTreeMap<NaiveDate, i64>> {
        let sessions = self.store.sessions(user_id)?;
        Ok(monthly::monthly_activity(sessions, month))
    }

    /// Ids of users whose most recent logout is more than `days` days before
    /// `now`, sorted.
    pub fn find_inactive_users(&self, days: i64, now: NaiveDateTime) -> Vec<String> {
        inactivity::find_inactive_users(&self.store, days, now)
    }

    /// Three-tier classification of the user's total activity time.
    pub fn user_status(&self, user_id: &str) -> Result<UserStatus> {
        Ok(UserStatus::from_minutes(self.total_activity_time(user_id)?))
    }

    /// Date of the user's most recent logout.
    pub fn last_session_date(&self, user_id: &str) -> Result<Option<NaiveDate>> {
        Ok(status::last_session_date(self.store.sessions(user_id)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::PulseError;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_total_activity_requires_recorded_sessions() {
        let mut analytics = UserAnalytics::new();
        analytics.register_user("alice", "Alice").unwrap();
        // Registered but sessionless: NotFound, never a zero total.
        let err = analytics.total_activity_time("alice").unwrap_err();
        assert!(matches!(err, PulseError::NotFound(_)));
    }

    #[test]
    fn test_total_activity_merges_across_sessions() {
        let mut analytics = UserAnalytics::new();
        analytics.register_user("alice", "Alice").unwrap();
        analytics
            .record_session("alice", at("2024-03-01T10:00:00"), at("2024-03-01T11:00:00"))
            .unwrap();
        analytics
            .record_session("alice", at("2024-03-01T10:30:00"), at("2024-03-01T12:00:00"))
            .unwrap();
        assert_eq!(analytics.total_activity_time("alice").unwrap(), 120);
    }

    #[test]
    fn test_user_status_follows_total_activity() {
        let mut analytics = UserAnalytics::new();
        analytics.register_user("alice", "Alice").unwrap();
        analytics
            .record_session("alice", at("2024-03-01T10:00:00"), at("2024-03-01T11:15:00"))
            .unwrap();
        assert_eq!(analytics.user_status("alice").unwrap(), UserStatus::Active);

        analytics
            .record_session("alice", at("2024-03-02T10:00:00"), at("2024-03-02T11:00:00"))
            .unwrap();
        assert_eq!(
            analytics.user_status("alice").unwrap(),
            UserStatus::HighlyActive
        );
    }

    #[test]
    fn test_last_session_date() {
        let mut analytics = UserAnalytics::new();
        analytics.register_user("alice", "Alice").unwrap();
        analytics
            .record_session("alice", at("2024-03-01T10:00:00"), at("2024-03-10T11:00:00"))
            .unwrap();
        analytics
            .record_session("alice", at("2024-03-05T10:00:00"), at("2024-03-05T11:00:00"))
            .unwrap();
        assert_eq!(
            analytics.last_session_date("alice").unwrap(),
            Some("2024-03-10".parse().unwrap())
        );
    }

    #[test]
    fn test_monthly_metric_propagates_strict_existence() {
        let analytics = UserAnalytics::new();
        let month: YearMonth = "2024-03".parse().unwrap();
        assert!(analytics.monthly_activity_metric("ghost", month).is_err());
    }

    #[test]
    fn test_find_inactive_users_with_injected_now() {
        let mut analytics = UserAnalytics::new();
        analytics.register_user("alice", "Alice").unwrap();
        analytics.register_user("bob", "Bob").unwrap();
        analytics
            .record_session("alice", at("2024-01-01T09:00:00"), at("2024-01-01T10:00:00"))
            .unwrap();
        analytics
            .record_session("bob", at("2024-03-14T09:00:00"), at("2024-03-14T10:00:00"))
            .unwrap();

        let now = at("2024-03-15T12:00:00");
        assert_eq!(analytics.find_inactive_users(7, now), vec!["alice"]);
    }
}
