//! Markdown report generation from activity metrics.

use chrono::Duration;
use pulse_core::{Result, YearMonth};

use crate::activity::format_minutes;
use crate::service::UserAnalytics;

/// Report generator for creating markdown summaries.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Generate a monthly activity report for one user.
    ///
    /// Fails with `NotFound` (strict existence) if the user has no recorded
    /// sessions.
    pub fn monthly_report(
        analytics: &UserAnalytics,
        user_id: &str,
        month: YearMonth,
    ) -> Result<String> {
        let metric = analytics.monthly_activity_metric(user_id, month)?;
        let status = analytics.user_status(user_id)?;
        let total_minutes = analytics.total_activity_time(user_id)?;
        let last_session = analytics.last_session_date(user_id)?;

        let display_name = analytics
            .user(user_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| user_id.to_string());

        let mut report = String::new();

        report.push_str(&format!(
            "# Monthly Activity Report\n\n**{} — {}**\n\n",
            display_name,
            month.first_day().format("%B %Y")
        ));

        // Overview.
        let month_minutes: i64 = metric.values().sum();
        report.push_str("## Overview\n\n");
        report.push_str(&format!("- **Status:** {}\n", status));
        report.push_str(&format!(
            "- **Total Activity (all time):** {}\n",
            format_minutes(total_minutes)
        ));
        report.push_str(&format!(
            "- **Activity This Month:** {}\n",
            format_minutes(month_minutes)
        ));
        if let Some(date) = last_session {
            report.push_str(&format!("- **Last Session:** {}\n", date));
        }
        report.push_str(&format!("- **Active Days:** {}\n\n", metric.len()));

        // Daily breakdown table.
        report.push_str("## Daily Breakdown\n\n");
        report.push_str("| Day | Active Time |\n");
        report.push_str("|-----|-------------|\n");

        let mut current_date = month.first_day();
        let month_end = month.succ().first_day();
        while current_date < month_end {
            match metric.get(&current_date) {
                Some(minutes) => {
                    report.push_str(&format!(
                        "| {} | {} |\n",
                        current_date,
                        format_minutes(*minutes)
                    ));
                }
                None => {
                    report.push_str(&format!("| {} | - |\n", current_date));
                }
            }
            current_date += Duration::days(1);
        }
        report.push('\n');

        Ok(report)
    }
}
