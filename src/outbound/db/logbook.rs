use crate::domain::logbook::{
    FindLogDBParams, InsertLogDBParams, ListLogsDBParams, LogStatus, LogbookEntry, LogbookStore,
    ReviewLogDBParams,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{LogRow, LogRowList};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl LogbookStore for Repository {
    async fn insert_log_if_absent(&self, params: InsertLogDBParams) -> Result<LogbookEntry, Error> {
        let result = sqlx::query_as::<_, LogRow>(
            "insert into logbook_entries \
             (id, student_id, week_number, activities, skills_acquired, challenges, \
              solutions, learnings, next_week_plan, attachments) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             returning *",
        )
        .bind(Uuid::now_v7())
        .bind(params.student_id)
        .bind(params.week_number)
        .bind(params.narrative.activities)
        .bind(params.narrative.skills_acquired)
        .bind(params.narrative.challenges)
        .bind(params.narrative.solutions)
        .bind(params.narrative.learnings)
        .bind(params.narrative.next_week_plan)
        .bind(params.attachments)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(err) => {
                if let Some(database_error) = err.as_database_error()
                    && database_error.is_unique_violation()
                {
                    return Err(Error::OnConflict);
                }

                Err(Error::DatabaseError(err))
            }
        }
    }

    async fn find_log_by_id(&self, params: FindLogDBParams) -> Result<Option<LogbookEntry>, Error> {
        let result = sqlx::query_as::<_, LogRow>("select * from logbook_entries where id = $1")
            .bind(params.log_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into());

        Ok(result)
    }

    async fn list_logs(&self, params: ListLogsDBParams) -> Result<Vec<LogbookEntry>, Error> {
        let result = sqlx::query_as::<_, LogRow>(
            "select * from logbook_entries \
             where ($1::uuid is null or student_id = $1) \
             order by created_at desc",
        )
        .bind(params.student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(LogRowList(result).into())
    }

    async fn review_log_conditional(
        &self,
        params: ReviewLogDBParams,
    ) -> Result<Option<LogbookEntry>, Error> {
        // The single review is conditioned on the log still being pending;
        // a second decision matches nothing.
        let result = sqlx::query_as::<_, LogRow>(
            "update logbook_entries set status = $2, feedback = $3, updated_at = now() \
             where id = $1 and status = $4 \
             returning *",
        )
        .bind(params.log_id)
        .bind(params.status)
        .bind(params.feedback)
        .bind(LogStatus::Pending)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }
}
