//! Total activity time from the union of session intervals.
//!
//! Sessions may overlap, touch, or be disjoint, and may span multiple days.
//! Overlapping or touching time is counted once; gaps with no open session
//! are excluded.

use pulse_core::{PulseError, Result, Session, YearMonth};

/// Total wall-clock minutes covered by the union of the given sessions.
///
/// Sorts by login time and sweeps a running window: a session whose login is
/// at or before the window's end extends it (a closed-interval touch counts
/// as overlap, so adjacent sessions merge into one span); a login strictly
/// past the window's end flushes the window and starts a new one. Each span
/// is truncated to whole minutes when flushed.
///
/// Fails with `InvalidArgument` on an empty slice — callers go through the
/// store's strict-existence check, which guarantees at least one session.
pub fn total_activity_minutes(sessions: &[Session]) -> Result<i64> {
    if sessions.is_empty() {
        return Err(PulseError::InvalidArgument("no sessions to analyze".into()));
    }

    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by_key(|s| s.login_time());

    let mut window_start = sorted[0].login_time();
    let mut window_end = sorted[0].logout_time();
    let mut total = 0;

    for session in &sorted[1..] {
        if session.login_time() <= window_end {
            window_end = window_end.max(session.logout_time());
        } else {
            total += (window_end - window_start).num_minutes();
            window_start = session.login_time();
            window_end = session.logout_time();
        }
    }
    total += (window_end - window_start).num_minutes();

    Ok(total)
}

/// Month-granularity membership test: a session belongs to a month unless it
/// is entirely before or entirely after it. Only year and month of the
/// session endpoints are compared, so any overlap counts, even partial-day.
pub fn session_in_month(session: &Session, month: YearMonth) -> bool {
    YearMonth::from_datetime(session.login_time()) <= month
        && YearMonth::from_datetime(session.logout_time()) >= month
}

/// Whole minutes of the session falling inside the month's
/// `[monthStart, monthEnd)` window, floored at zero.
///
/// The floor guards against a session that does not actually overlap the
/// month; `session_in_month` should have filtered those out already.
pub fn clipped_minutes(session: &Session, month: YearMonth) -> i64 {
    let effective_start = session.login_time().max(month.start_instant());
    let effective_end = session.logout_time().min(month.end_instant());
    (effective_end - effective_start).num_minutes().max(0)
}

/// Format minutes as a human-readable duration string.
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}
