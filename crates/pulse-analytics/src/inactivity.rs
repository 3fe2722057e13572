//! Inactivity detection across all users.

use chrono::{Duration, NaiveDateTime};
use pulse_core::ActivityStore;

/// Ids of users whose most recent logout precedes `now` by strictly more
/// than `days` days.
///
/// `now` is an explicit parameter rather than a clock read so the scan stays
/// deterministic under test. The comparison is on the full elapsed duration:
/// a user whose last logout is exactly `days` days old is still on time; one
/// minute older and they are inactive. Users with no recorded sessions are
/// skipped entirely. The result is sorted for stable output.
pub fn find_inactive_users(store: &ActivityStore, days: i64, now: NaiveDateTime) -> Vec<String> {
    let threshold = Duration::days(days);
    let mut inactive = Vec::new();

    for (user_id, sessions) in store.users_with_sessions() {
        let last_logout = sessions.iter().map(|s| s.logout_time()).max();
        if let Some(last_logout) = last_logout {
            if now.signed_duration_since(last_logout) > threshold {
                inactive.push(user_id.to_string());
            }
        }
    }

    inactive.sort();
    inactive
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    fn store_with(last_logouts: &[(&str, &str)]) -> ActivityStore {
        let mut store = ActivityStore::new();
        for (id, logout) in last_logouts {
            store.register_user(*id, *id).unwrap();
            store.record_session(id, at(logout), at(logout)).unwrap();
        }
        store
    }

    #[test]
    fn test_exactly_n_days_old_is_not_inactive() {
        let now = at("2024-03-15T12:00:00");
        let store = store_with(&[("alice", "2024-03-08T12:00:00")]);
        assert!(find_inactive_users(&store, 7, now).is_empty());
    }

    #[test]
    fn test_one_minute_past_the_boundary_is_inactive() {
        let now = at("2024-03-15T12:00:00");
        let store = store_with(&[("alice", "2024-03-08T11:59:00")]);
        assert_eq!(find_inactive_users(&store, 7, now), vec!["alice"]);
    }

    #[test]
    fn test_max_logout_wins_over_later_recorded_sessions() {
        let now = at("2024-03-15T12:00:00");
        let mut store = ActivityStore::new();
        store.register_user("alice", "Alice").unwrap();
        // The stale session is recorded last; only the maximum logout matters.
        store
            .record_session("alice", at("2024-03-14T09:00:00"), at("2024-03-14T10:00:00"))
            .unwrap();
        store
            .record_session("alice", at("2024-01-01T09:00:00"), at("2024-01-01T10:00:00"))
            .unwrap();
        assert!(find_inactive_users(&store, 7, now).is_empty());
    }

    #[test]
    fn test_users_without_sessions_are_skipped() {
        let now = at("2024-03-15T12:00:00");
        let mut store = store_with(&[("alice", "2024-01-01T10:00:00")]);
        store.register_user("bob", "Bob").unwrap();
        // Bob has no sessions: not reported, not even as inactive.
        assert_eq!(find_inactive_users(&store, 7, now), vec!["alice"]);
    }

    #[test]
    fn test_result_is_sorted() {
        let now = at("2024-03-15T12:00:00");
        let store = store_with(&[
            ("carol", "2024-01-01T10:00:00"),
            ("alice", "2024-01-02T10:00:00"),
            ("bob", "2024-01-03T10:00:00"),
        ]);
        assert_eq!(
            find_inactive_users(&store, 7, now),
            vec!["alice", "bob", "carol"]
        );
    }
}
