use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Company,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
            Role::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Role::Student),
            "company" => Ok(Role::Company),
            "administrator" => Ok(Role::Administrator),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

/// The authenticated caller, as resolved by the upstream identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "entry_status", rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    SubmittedToCompany,
    CompanyApproved,
    CompanyDeclined,
    EditedByCompany,
    SubmittedToDean,
    DeanApproved,
    DeanDeclined,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Pending => "pending",
            EntryStatus::SubmittedToCompany => "submitted_to_company",
            EntryStatus::CompanyApproved => "company_approved",
            EntryStatus::CompanyDeclined => "company_declined",
            EntryStatus::EditedByCompany => "edited_by_company",
            EntryStatus::SubmittedToDean => "submitted_to_dean",
            EntryStatus::DeanApproved => "dean_approved",
            EntryStatus::DeanDeclined => "dean_declined",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One calendar day of logged hours. `total_hours` is always derived from the
/// three time fields, never accepted from a caller.
#[derive(Debug, Clone)]
pub struct TimesheetEntry {
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
