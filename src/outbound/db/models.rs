use crate::domain::logbook::{LogStatus, LogbookEntry, Narrative};
use crate::domain::timesheet::{EntryStatus, TimesheetEntry};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(FromRow, Clone)]
pub struct EntryRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub entry_date: Date,
    pub time_in: i32,
    pub time_out: i32,
    pub break_minutes: i32,
    pub total_hours: f64,
    pub status: EntryStatus,
    pub company_notes: Option<String>,
    pub dean_notes: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl From<EntryRow> for TimesheetEntry {
    fn from(value: EntryRow) -> Self {
        Self {
            id: value.id,
            student_id: value.student_id,
            company_id: value.company_id,
            entry_date: value.entry_date,
            time_in: value.time_in,
            time_out: value.time_out,
            break_minutes: value.break_minutes,
            total_hours: value.total_hours,
            status: value.status,
            company_notes: value.company_notes,
            dean_notes: value.dean_notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

pub struct EntryRowList(pub Vec<EntryRow>);

impl From<EntryRowList> for Vec<TimesheetEntry> {
    fn from(value: EntryRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}

#[derive(FromRow, Clone)]
pub struct LogRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub week_number: Option<i32>,
    pub activities: String,
    pub skills_acquired: String,
    pub challenges: String,
    pub solutions: String,
    pub learnings: String,
    pub next_week_plan: String,
    pub attachments: Vec<String>,
    pub status: LogStatus,
    pub feedback: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

impl From<LogRow> for LogbookEntry {
    fn from(value: LogRow) -> Self {
        Self {
            id: value.id,
            student_id: value.student_id,
            week_number: value.week_number,
            narrative: Narrative {
                activities: value.activities,
                skills_acquired: value.skills_acquired,
                challenges: value.challenges,
                solutions: value.solutions,
                learnings: value.learnings,
                next_week_plan: value.next_week_plan,
            },
            attachments: value.attachments,
            status: value.status,
            feedback: value.feedback,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

pub struct LogRowList(pub Vec<LogRow>);

impl From<LogRowList> for Vec<LogbookEntry> {
    fn from(value: LogRowList) -> Self {
        value.0.into_iter().map(|row| row.into()).collect()
    }
}
