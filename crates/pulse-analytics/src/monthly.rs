//! Daily activity breakdown for a calendar month.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pulse_core::{Session, YearMonth};

use crate::activity::{clipped_minutes, session_in_month};

/// Map each day of the month to the active minutes attributable to it.
///
/// Every session overlapping the month (at month granularity) contributes
/// its month-clipped duration to the bucket keyed by its **login date** — a
/// session spanning midnight lands entirely on the day it started, and
/// same-day overlapping sessions are summed without union-merging. Both are
/// deliberate properties of this view; the union semantics live in
/// [`crate::activity::total_activity_minutes`] only.
///
/// Returns an empty map if no session falls in the month.
pub fn monthly_activity(sessions: &[Session], month: YearMonth) -> BTreeMap<NaiveDate, i64> {
    let mut by_day = BTreeMap::new();

    for session in sessions.iter().filter(|s| session_in_month(s, month)) {
        let minutes = clipped_minutes(session, month);
        *by_day.entry(session.login_date()).or_insert(0) += minutes;
    }

    by_day
}
