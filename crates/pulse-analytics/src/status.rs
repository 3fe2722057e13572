//! Three-tier status classification from total activity time.

use std::fmt;

use chrono::NaiveDate;
use pulse_core::Session;
use serde::Serialize;

/// Below this many total active minutes a user is `Inactive`.
pub const ACTIVE_THRESHOLD_MINUTES: i64 = 60;
/// At or above this many total active minutes a user is `HighlyActive`.
pub const HIGHLY_ACTIVE_THRESHOLD_MINUTES: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserStatus {
    Inactive,
    Active,
    HighlyActive,
}

impl UserStatus {
    /// Classify total activity minutes: `<60` inactive, `[60,120)` active,
    /// `>=120` highly active.
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes < ACTIVE_THRESHOLD_MINUTES {
            UserStatus::Inactive
        } else if minutes < HIGHLY_ACTIVE_THRESHOLD_MINUTES {
            UserStatus::Active
        } else {
            UserStatus::HighlyActive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Inactive => "Inactive",
            UserStatus::Active => "Active",
            UserStatus::HighlyActive => "Highly active",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date portion of the session with the maximum logout timestamp.
///
/// `None` only for an empty slice, which the store's strict-existence
/// contract already rules out for callers going through it.
pub fn last_session_date(sessions: &[Session]) -> Option<NaiveDate> {
    sessions
        .iter()
        .max_by_key(|s| s.logout_time())
        .map(|s| s.logout_time().date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn session(login: &str, logout: &str) -> Session {
        Session::new(
            login.parse::<NaiveDateTime>().unwrap(),
            logout.parse::<NaiveDateTime>().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(UserStatus::from_minutes(0), UserStatus::Inactive);
        assert_eq!(UserStatus::from_minutes(59), UserStatus::Inactive);
        assert_eq!(UserStatus::from_minutes(60), UserStatus::Active);
        assert_eq!(UserStatus::from_minutes(119), UserStatus::Active);
        assert_eq!(UserStatus::from_minutes(120), UserStatus::HighlyActive);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(UserStatus::Inactive.to_string(), "Inactive");
        assert_eq!(UserStatus::Active.to_string(), "Active");
        assert_eq!(UserStatus::HighlyActive.to_string(), "Highly active");
    }

    #[test]
    fn test_last_session_date_takes_max_logout() {
        let sessions = vec![
            session("2024-03-01T09:00:00", "2024-03-10T10:00:00"),
            session("2024-03-05T09:00:00", "2024-03-05T10:00:00"),
        ];
        // The first session logs out latest even though another starts later.
        assert_eq!(
            last_session_date(&sessions),
            Some("2024-03-10".parse().unwrap())
        );
    }

    #[test]
    fn test_last_session_date_empty() {
        assert_eq!(last_session_date(&[]), None);
    }

    #[test]
    fn test_status_serializes_as_variant_name() {
        let json = serde_json::to_string(&UserStatus::HighlyActive).unwrap();
        assert_eq!(json, "\"HighlyActive\"");
    }
}
