//! Calendar-week grouping and the derived weekly workflow state.
//!
//! [`aggregate_status`] is the single source of truth for "what state is
//! this week in". Every consumer derives the label from it at read time;
//! the label is never persisted.

use crate::domain::timesheet::data::{EntryStatus, TimesheetEntry};
use serde::Serialize;
use std::fmt;
use time::{Date, Duration};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    Draft,
    NeedsStudent,
    Locked,
    DeanReview,
    ReadyForDean,
    CompanyReview,
}

impl WeekStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStatus::Draft => "draft",
            WeekStatus::NeedsStudent => "needs_student",
            WeekStatus::Locked => "locked",
            WeekStatus::DeanReview => "dean_review",
            WeekStatus::ReadyForDean => "ready_for_dean",
            WeekStatus::CompanyReview => "company_review",
        }
    }
}

impl fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The Monday on or before `date`.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(date.weekday().number_days_from_monday() as i64)
}

/// The Sunday closing the week that contains `date`.
pub fn week_end(date: Date) -> Date {
    week_start(date) + Duration::days(6)
}

/// Collapse a week's member statuses into one workflow label.
///
/// The rules are evaluated top to bottom over the whole multiset; the first
/// match wins. A declined entry blocks the week no matter what the rest of
/// it looks like.
pub fn aggregate_status(statuses: &[EntryStatus]) -> WeekStatus {
    if statuses.is_empty() {
        return WeekStatus::Draft;
    }

    if statuses.contains(&EntryStatus::CompanyDeclined) {
        return WeekStatus::NeedsStudent;
    }

    if statuses.iter().all(|&s| s == EntryStatus::DeanApproved) {
        return WeekStatus::Locked;
    }

    if statuses
        .iter()
        .any(|&s| matches!(s, EntryStatus::SubmittedToDean | EntryStatus::DeanDeclined))
    {
        return WeekStatus::DeanReview;
    }

    if statuses.iter().all(|&s| s == EntryStatus::CompanyApproved) {
        return WeekStatus::ReadyForDean;
    }

    if statuses
        .iter()
        .any(|&s| matches!(s, EntryStatus::SubmittedToCompany | EntryStatus::EditedByCompany))
    {
        return WeekStatus::CompanyReview;
    }

    WeekStatus::Draft
}

/// One student's Monday-aligned week and the entries inside it, with the
/// derived aggregate state and hour totals. Built fresh on every read.
#[derive(Debug, Clone)]
pub struct WeekGroup {
    pub student_id: Uuid,
    pub week_start: Date,
    pub week_end: Date,
    pub entries: Vec<TimesheetEntry>,
    pub status: WeekStatus,
    pub total_hours: f64,
    pub approved_hours: f64,
}

impl WeekGroup {
    pub fn build(student_id: Uuid, week_of: Date, entries: Vec<TimesheetEntry>) -> Self {
        let statuses: Vec<EntryStatus> = entries.iter().map(|e| e.status).collect();
        let total_hours = round2(entries.iter().map(|e| e.total_hours).sum());
        let approved_hours = round2(
            entries
                .iter()
                .filter(|e| e.status == EntryStatus::DeanApproved)
                .map(|e| e.total_hours)
                .sum(),
        );

        Self {
            student_id,
            week_start: week_start(week_of),
            week_end: week_end(week_of),
            status: aggregate_status(&statuses),
            entries,
            total_hours,
            approved_hours,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
