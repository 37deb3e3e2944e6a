use crate::domain::logbook::{
    CreateLogError, CreateLogParams, CreateLogResult, FindLogDBParams, InsertLogDBParams,
    ListLogsDBParams, ListLogsError, ListLogsParams, ListLogsResult, LogbookService, LogbookStore,
    ReviewLogDBParams, ReviewLogError, ReviewLogParams, ReviewLogResult,
};
use crate::domain::timesheet::Role;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct Service<DB>
where
    DB: LogbookStore,
{
    db: DB,
}

impl<DB> Service<DB>
where
    DB: LogbookStore,
{
    pub fn new(db: DB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<DB> LogbookService for Service<DB>
where
    DB: LogbookStore,
{
    async fn create_log(&self, params: CreateLogParams) -> Result<CreateLogResult, CreateLogError> {
        if params.actor.role != Role::Student {
            return Err(CreateLogError::NotAStudent);
        }
        if let Some(field) = params.narrative.first_missing_field() {
            return Err(CreateLogError::MissingField(field));
        }

        let result = self
            .db
            .insert_log_if_absent(InsertLogDBParams {
                student_id: params.actor.id,
                week_number: params.week_number,
                narrative: params.narrative,
                attachments: params.attachments,
            })
            .await;

        match result {
            Ok(log) => Ok(CreateLogResult { log }),
            Err(crate::outbound::db::error::Error::OnConflict) => Err(
                CreateLogError::DuplicateWeek(params.week_number.unwrap_or_default()),
            ),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_logs(&self, params: ListLogsParams) -> Result<ListLogsResult, ListLogsError> {
        let student_id = match params.actor.role {
            Role::Student => {
                if params.student_id.is_some_and(|id| id != params.actor.id) {
                    return Err(ListLogsError::WrongActor);
                }
                Some(params.actor.id)
            }
            // The logbook is reviewed by the administrator alone; company
            // reviewers have no standing over it.
            Role::Company => return Err(ListLogsError::WrongActor),
            Role::Administrator => params.student_id,
        };

        let logs = self.db.list_logs(ListLogsDBParams { student_id }).await?;

        Ok(ListLogsResult { logs })
    }

    async fn review_log(&self, params: ReviewLogParams) -> Result<ReviewLogResult, ReviewLogError> {
        if params.actor.role != Role::Administrator {
            return Err(ReviewLogError::NotAnAdministrator);
        }

        let reviewed = self
            .db
            .review_log_conditional(ReviewLogDBParams {
                log_id: params.log_id,
                status: params.decision.target(),
                feedback: params.feedback,
            })
            .await?;

        match reviewed {
            Some(log) => Ok(ReviewLogResult { log }),
            None => {
                let current = self
                    .db
                    .find_log_by_id(FindLogDBParams {
                        log_id: params.log_id,
                    })
                    .await?
                    .ok_or(ReviewLogError::NotFound)?;

                Err(ReviewLogError::AlreadyReviewed {
                    current: current.status,
                })
            }
        }
    }
}
