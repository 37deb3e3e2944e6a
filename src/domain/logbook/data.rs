use serde::{Deserialize, Serialize};
use std::fmt;
use time::PrimitiveDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "log_status", rename_all = "snake_case")]
pub enum LogStatus {
    Pending,
    Approved,
    Declined,
}

impl LogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStatus::Pending => "pending",
            LogStatus::Approved => "approved",
            LogStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weekly narrative log. The six narrative fields are fixed at creation;
/// only the administrator's decision and feedback are written afterwards.
#[derive(Debug, Clone)]
pub struct LogbookEntry {
    pub id: Uuid,
    pub student_id: Uuid,
    pub week_number: Option<i32>,
    pub narrative: Narrative,
    pub attachments: Vec<String>,
    pub status: LogStatus,
    pub feedback: Option<String>,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

/// The six required narrative fields of a weekly log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    pub activities: String,
    pub skills_acquired: String,
    pub challenges: String,
    pub solutions: String,
    pub learnings: String,
    pub next_week_plan: String,
}

impl Narrative {
    /// The fields in declaration order, paired with their wire names.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("activities", &self.activities),
            ("skills_acquired", &self.skills_acquired),
            ("challenges", &self.challenges),
            ("solutions", &self.solutions),
            ("learnings", &self.learnings),
            ("next_week_plan", &self.next_week_plan),
        ]
    }

    /// The name of the first empty field, if any.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
    }
}
