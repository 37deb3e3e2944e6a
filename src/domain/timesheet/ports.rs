use crate::domain::directory::DirectoryError;
use crate::domain::timesheet::data::{Actor, EntryStatus, TimesheetEntry};
use crate::domain::timesheet::hours::ClockError;
use crate::domain::timesheet::permissions::PermissionError;
use crate::domain::timesheet::transitions::TransitionError;
use crate::domain::timesheet::week::WeekGroup;
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TimesheetService: Send + Sync {
    async fn create_entry(
        &self,
        params: CreateEntryParams,
    ) -> Result<CreateEntryResult, CreateEntryError>;
    async fn update_entry(
        &self,
        params: UpdateEntryParams,
    ) -> Result<UpdateEntryResult, UpdateEntryError>;
    async fn list_entries(
        &self,
        params: ListEntriesParams,
    ) -> Result<ListEntriesResult, ListEntriesError>;
    async fn week_view(&self, params: WeekViewParams) -> Result<WeekViewResult, WeekViewError>;
    async fn submit_week(
        &self,
        params: SubmitWeekParams,
    ) -> Result<SubmitWeekResult, SubmitWeekError>;
    async fn approve_all(
        &self,
        params: ApproveAllParams,
    ) -> Result<ApproveAllResult, ApproveAllError>;
    async fn submit_to_dean(
        &self,
        params: SubmitToDeanParams,
    ) -> Result<SubmitToDeanResult, SubmitToDeanError>;
}

//------------------------------------------------------------------------------
// Create Entry
//------------------------------------------------------------------------------

pub struct CreateEntryParams {
    pub actor: Actor,
    pub entry_date: Date,
    pub time_in: String,
    pub time_out: String,
    pub break_minutes: i32,
}

pub struct CreateEntryResult {
    pub entry: TimesheetEntry,
}

#[derive(Debug, Error)]
pub enum CreateEntryError {
    #[error(transparent)]
    InvalidClock(#[from] ClockError),

    #[error("break minutes must not be negative")]
    NegativeBreak,

    #[error("cannot log hours for a future date")]
    FutureDate,

    #[error("only students create entries")]
    NotAStudent,

    #[error("student has no assigned reviewing company")]
    NoAssignedCompany,

    #[error("an entry for {0} already exists")]
    DuplicateDay(Date),

    #[error("the week starting {0} already holds 7 entries")]
    WeekFull(Date),

    #[error(transparent)]
    DirectoryError(#[from] DirectoryError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Update Entry
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    CompanyApprove,
    CompanyDecline,
    DeanApprove,
    DeanDecline,
}

impl ReviewDecision {
    pub fn target(&self) -> EntryStatus {
        match self {
            ReviewDecision::CompanyApprove => EntryStatus::CompanyApproved,
            ReviewDecision::CompanyDecline => EntryStatus::CompanyDeclined,
            ReviewDecision::DeanApprove => EntryStatus::DeanApproved,
            ReviewDecision::DeanDecline => EntryStatus::DeanDeclined,
        }
    }
}

#[derive(Debug, Clone)]
pub enum EntryChange {
    /// Replace the time fields; the total is re-derived and, depending on
    /// who edits, the status may move (student edit of a declined entry
    /// reverts it to pending, a company edit marks it edited_by_company).
    Times {
        time_in: String,
        time_out: String,
        break_minutes: i32,
    },
    /// Student hands one entry to the company reviewer.
    Submit,
    /// A reviewer decision, with optional notes for the student.
    Review {
        decision: ReviewDecision,
        notes: Option<String>,
    },
}

pub struct UpdateEntryParams {
    pub actor: Actor,
    pub entry_id: Uuid,
    /// The status the caller last observed; the write is conditioned on it.
    pub expected_status: EntryStatus,
    pub change: EntryChange,
}

pub struct UpdateEntryResult {
    pub entry: TimesheetEntry,
}

#[derive(Debug, Error)]
pub enum UpdateEntryError {
    #[error("entry not found")]
    NotFound,

    #[error(transparent)]
    InvalidClock(#[from] ClockError),

    #[error("break minutes must not be negative")]
    NegativeBreak,

    #[error("actor has no standing over this entry")]
    WrongActor,

    #[error(transparent)]
    NotPermitted(#[from] PermissionError),

    #[error("entry status is {current}, not {expected}")]
    StaleStatus {
        expected: EntryStatus,
        current: EntryStatus,
    },

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// List Entries
//------------------------------------------------------------------------------

pub struct ListEntriesParams {
    pub actor: Actor,
    pub student_id: Option<Uuid>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

pub struct ListEntriesResult {
    pub entries: Vec<TimesheetEntry>,
}

#[derive(Debug, Error)]
pub enum ListEntriesError {
    #[error("actor may not list these entries")]
    WrongActor,

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Week View
//------------------------------------------------------------------------------

pub struct WeekViewParams {
    pub actor: Actor,
    pub student_id: Uuid,
    /// Any date inside the week of interest; snapped to its Monday.
    pub week_of: Date,
}

pub struct WeekViewResult {
    pub week: WeekGroup,
}

#[derive(Debug, Error)]
pub enum WeekViewError {
    #[error("actor may not view this student's week")]
    WrongActor,

    #[error(transparent)]
    DirectoryError(#[from] DirectoryError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Submit Week
//------------------------------------------------------------------------------

pub struct SubmitWeekParams {
    pub actor: Actor,
    pub from: Date,
    pub to: Date,
}

/// `affected` of zero means nothing was pending in the range; callers can
/// tell a fresh submission apart from a repeat.
pub struct SubmitWeekResult {
    pub affected: u64,
}

#[derive(Debug, Error)]
pub enum SubmitWeekError {
    #[error("only students submit their week")]
    NotAStudent,

    #[error("date range is inverted")]
    InvalidRange,

    #[error(transparent)]
    TransitionError(#[from] TransitionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Approve All
//------------------------------------------------------------------------------

pub struct ApproveAllParams {
    pub actor: Actor,
    pub student_id: Uuid,
}

pub struct ApproveAllResult {
    pub affected: u64,
}

#[derive(Debug, Error)]
pub enum ApproveAllError {
    #[error("only company reviewers approve entries")]
    NotACompany,

    #[error("student is not assigned to this company")]
    NotAssigned,

    #[error(transparent)]
    DirectoryError(#[from] DirectoryError),

    #[error(transparent)]
    TransitionError(#[from] TransitionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Submit To Dean
//------------------------------------------------------------------------------

pub struct SubmitToDeanParams {
    pub actor: Actor,
    pub student_id: Uuid,
}

pub struct SubmitToDeanResult {
    pub affected: u64,
}

#[derive(Debug, Error)]
pub enum SubmitToDeanError {
    #[error("actor may not submit this student's entries to the dean")]
    WrongActor,

    /// Distinct from an `affected` count: nothing is currently
    /// company-approved, so there was no submission at all.
    #[error("no company-approved entries to submit")]
    NothingEligible,

    #[error(transparent)]
    TransitionError(#[from] TransitionError),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Entry Store
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait EntryStore: Send + Sync + 'static {
    /// Conflict-checked insert; a second entry for the same (student, date)
    /// fails with [`DatabaseError::OnConflict`] at the write layer.
    async fn insert_entry_if_absent(
        &self,
        params: InsertEntryDBParams,
    ) -> Result<TimesheetEntry, DatabaseError>;

    async fn find_entry_by_id(
        &self,
        params: FindEntryDBParams,
    ) -> Result<Option<TimesheetEntry>, DatabaseError>;

    async fn list_entries(
        &self,
        params: ListEntriesDBParams,
    ) -> Result<Vec<TimesheetEntry>, DatabaseError>;

    async fn count_entries_in_range(
        &self,
        params: CountEntriesDBParams,
    ) -> Result<i64, DatabaseError>;

    /// Compare-and-set on the current status. `None` means the row no
    /// longer carries `expected_status` and nothing was written.
    async fn update_entry_conditional(
        &self,
        params: ConditionalUpdateDBParams,
    ) -> Result<Option<TimesheetEntry>, DatabaseError>;

    /// One filtered update statement; returns the number of rows moved.
    async fn update_entries_where(
        &self,
        params: BulkUpdateDBParams,
    ) -> Result<u64, DatabaseError>;
}

//------------------------------------------------------------------------------
// Insert Entry
//------------------------------------------------------------------------------

pub struct InsertEntryDBParams {
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub entry_date: Date,
    pub time_in: i32,
    pub time_out: i32,
    pub break_minutes: i32,
    pub total_hours: f64,
}

//------------------------------------------------------------------------------
// Find Entry
//------------------------------------------------------------------------------

pub struct FindEntryDBParams {
    pub entry_id: Uuid,
}

//------------------------------------------------------------------------------
// List Entries (store)
//------------------------------------------------------------------------------

pub struct ListEntriesDBParams {
    pub student_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

//------------------------------------------------------------------------------
// Count Entries
//------------------------------------------------------------------------------

pub struct CountEntriesDBParams {
    pub student_id: Uuid,
    pub from: Date,
    pub to: Date,
}

//------------------------------------------------------------------------------
// Conditional Update
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub time_in: Option<i32>,
    pub time_out: Option<i32>,
    pub break_minutes: Option<i32>,
    pub total_hours: Option<f64>,
    pub status: Option<EntryStatus>,
    pub company_notes: Option<String>,
    pub dean_notes: Option<String>,
}

pub struct ConditionalUpdateDBParams {
    pub entry_id: Uuid,
    pub expected_status: EntryStatus,
    pub patch: EntryPatch,
}

//------------------------------------------------------------------------------
// Bulk Update
//------------------------------------------------------------------------------

pub struct BulkUpdateDBParams {
    pub student_id: Uuid,
    pub company_id: Option<Uuid>,
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub from_status: EntryStatus,
    pub to_status: EntryStatus,
}
