//! Activity metrics for pulse sessions.
//!
//! Computes total active time from the union of session intervals, daily
//! activity breakdowns per calendar month, inactivity detection, and the
//! three-tier status classification.

pub mod activity;
pub mod inactivity;
pub mod monthly;
pub mod reports;
pub mod service;
pub mod status;

pub use activity::total_activity_minutes;
pub use inactivity::find_inactive_users;
pub use monthly::monthly_activity;
pub use reports::ReportGenerator;
pub use service::UserAnalytics;
pub use status::UserStatus;
