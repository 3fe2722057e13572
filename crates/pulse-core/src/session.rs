use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{PulseError, Result};

/// One continuous logged-in period: the closed interval
/// `[login_time, logout_time]`.
///
/// Immutable once recorded. A zero-length session (login equal to logout)
/// is legal and contributes zero minutes downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    login_time: NaiveDateTime,
    logout_time: NaiveDateTime,
}

impl Session {
    /// Fails with `InvalidInterval` if the login instant is after the logout
    /// instant.
    pub fn new(login_time: NaiveDateTime, logout_time: NaiveDateTime) -> Result<Self> {
        if login_time > logout_time {
            return Err(PulseError::InvalidInterval {
                login: login_time,
                logout: logout_time,
            });
        }
        Ok(Self {
            login_time,
            logout_time,
        })
    }

    pub fn login_time(&self) -> NaiveDateTime {
        self.login_time
    }

    pub fn logout_time(&self) -> NaiveDateTime {
        self.logout_time
    }

    /// Calendar date of the login instant.
    pub fn login_date(&self) -> NaiveDate {
        self.login_time.date()
    }

    /// Session length in whole minutes, truncated toward zero.
    pub fn duration_minutes(&self) -> i64 {
        (self.logout_time - self.login_time).num_minutes()
    }
}
