use crate::domain::logbook::data::{LogStatus, LogbookEntry, Narrative};
use crate::domain::timesheet::Actor;
use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait LogbookService: Send + Sync {
    async fn create_log(&self, params: CreateLogParams) -> Result<CreateLogResult, CreateLogError>;
    async fn list_logs(&self, params: ListLogsParams) -> Result<ListLogsResult, ListLogsError>;
    async fn review_log(&self, params: ReviewLogParams) -> Result<ReviewLogResult, ReviewLogError>;
}

//------------------------------------------------------------------------------
// Create Log
//------------------------------------------------------------------------------

pub struct CreateLogParams {
    pub actor: Actor,
    pub week_number: Option<i32>,
    pub narrative: Narrative,
    pub attachments: Vec<String>,
}

pub struct CreateLogResult {
    pub log: LogbookEntry,
}

#[derive(Debug, Error)]
pub enum CreateLogError {
    #[error("only students create logbook entries")]
    NotAStudent,

    #[error("narrative field {0:?} is required")]
    MissingField(&'static str),

    #[error("a log for week {0} already exists")]
    DuplicateWeek(i32),

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// List Logs
//------------------------------------------------------------------------------

pub struct ListLogsParams {
    pub actor: Actor,
    pub student_id: Option<Uuid>,
}

pub struct ListLogsResult {
    pub logs: Vec<LogbookEntry>,
}

#[derive(Debug, Error)]
pub enum ListLogsError {
    #[error("actor may not list these logs")]
    WrongActor,

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

//------------------------------------------------------------------------------
// Review Log
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogDecision {
    Approve,
    Decline,
}

impl LogDecision {
    pub fn target(&self) -> LogStatus {
        match self {
            LogDecision::Approve => LogStatus::Approved,
            LogDecision::Decline => LogStatus::Declined,
        }
    }
}

pub struct ReviewLogParams {
    pub actor: Actor,
    pub log_id: Uuid,
    pub decision: LogDecision,
    pub feedback: Option<String>,
}

pub struct ReviewLogResult {
    pub log: LogbookEntry,
}

#[derive(Debug, Error)]
pub enum ReviewLogError {
    #[error("log not found")]
    NotFound,

    #[error("only the administrator reviews logbook entries")]
    NotAnAdministrator,

    /// The single review already happened; the log is terminal.
    #[error("log was already reviewed and is {current}")]
    AlreadyReviewed { current: LogStatus },

    #[error(transparent)]
    DatabaseError(#[from] DatabaseError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Logbook Store
////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait LogbookStore: Send + Sync + 'static {
    /// Conflict-checked insert; a second log for the same (student, week)
    /// fails with [`DatabaseError::OnConflict`] at the write layer.
    async fn insert_log_if_absent(
        &self,
        params: InsertLogDBParams,
    ) -> Result<LogbookEntry, DatabaseError>;

    async fn find_log_by_id(
        &self,
        params: FindLogDBParams,
    ) -> Result<Option<LogbookEntry>, DatabaseError>;

    async fn list_logs(&self, params: ListLogsDBParams) -> Result<Vec<LogbookEntry>, DatabaseError>;

    /// Writes the decision only while the log is still pending; `None`
    /// means it was already reviewed and nothing was written.
    async fn review_log_conditional(
        &self,
        params: ReviewLogDBParams,
    ) -> Result<Option<LogbookEntry>, DatabaseError>;
}

//------------------------------------------------------------------------------
// Insert Log
//------------------------------------------------------------------------------

pub struct InsertLogDBParams {
    pub student_id: Uuid,
    pub week_number: Option<i32>,
    pub narrative: Narrative,
    pub attachments: Vec<String>,
}

//------------------------------------------------------------------------------
// Find Log
//------------------------------------------------------------------------------

pub struct FindLogDBParams {
    pub log_id: Uuid,
}

//------------------------------------------------------------------------------
// List Logs (store)
//------------------------------------------------------------------------------

pub struct ListLogsDBParams {
    pub student_id: Option<Uuid>,
}

//------------------------------------------------------------------------------
// Review Log (store)
//------------------------------------------------------------------------------

pub struct ReviewLogDBParams {
    pub log_id: Uuid,
    pub status: LogStatus,
    pub feedback: Option<String>,
}
