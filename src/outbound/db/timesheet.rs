use crate::domain::timesheet::{
    BulkUpdateDBParams, ConditionalUpdateDBParams, CountEntriesDBParams, EntryStore,
    FindEntryDBParams, InsertEntryDBParams, ListEntriesDBParams, TimesheetEntry,
};
use crate::outbound::db::error::Error;
use crate::outbound::db::models::{EntryRow, EntryRowList};
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl EntryStore for Repository {
    async fn insert_entry_if_absent(
        &self,
        params: InsertEntryDBParams,
    ) -> Result<TimesheetEntry, Error> {
        // The unique (student_id, entry_date) constraint is the duplicate
        // check; there is no separate existence lookup to race against.
        let result = sqlx::query_as::<_, EntryRow>(
            "insert into timesheet_entries \
             (id, student_id, company_id, entry_date, time_in, time_out, break_minutes, total_hours) \
             values ($1, $2, $3, $4, $5, $6, $7, $8) \
             returning *",
        )
        .bind(Uuid::now_v7())
        .bind(params.student_id)
        .bind(params.company_id)
        .bind(params.entry_date)
        .bind(params.time_in)
        .bind(params.time_out)
        .bind(params.break_minutes)
        .bind(params.total_hours)
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

    async fn find_entry_by_id(
        &self,
        params: FindEntryDBParams,
    ) -> Result<Option<TimesheetEntry>, Error> {
        let result = sqlx::query_as::<_, EntryRow>("select * from timesheet_entries where id = $1")
            .bind(params.entry_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|row| row.into());

        Ok(result)
    }

    async fn list_entries(
        &self,
        params: ListEntriesDBParams,
    ) -> Result<Vec<TimesheetEntry>, Error> {
        let result = sqlx::query_as::<_, EntryRow>(
            "select * from timesheet_entries \
             where ($1::uuid is null or student_id = $1) \
               and ($2::uuid is null or company_id = $2) \
               and ($3::date is null or entry_date >= $3) \
               and ($4::date is null or entry_date <= $4) \
             order by entry_date desc",
        )
        .bind(params.student_id)
        .bind(params.company_id)
        .bind(params.from)
        .bind(params.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(EntryRowList(result).into())
    }

    async fn count_entries_in_range(&self, params: CountEntriesDBParams) -> Result<i64, Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "select count(*) from timesheet_entries \
             where student_id = $1 and entry_date between $2 and $3",
        )
        .bind(params.student_id)
        .bind(params.from)
        .bind(params.to)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update_entry_conditional(
        &self,
        params: ConditionalUpdateDBParams,
    ) -> Result<Option<TimesheetEntry>, Error> {
        // Compare-and-set: the status predicate is part of the statement, so
        // a row that moved since the caller read it simply does not match.
        let result = sqlx::query_as::<_, EntryRow>(
            "update timesheet_entries set \
                 time_in = coalesce($3, time_in), \
                 time_out = coalesce($4, time_out), \
                 break_minutes = coalesce($5, break_minutes), \
                 total_hours = coalesce($6, total_hours), \
                 status = coalesce($7, status), \
                 company_notes = coalesce($8, company_notes), \
                 dean_notes = coalesce($9, dean_notes), \
                 updated_at = now() \
             where id = $1 and status = $2 \
             returning *",
        )
        .bind(params.entry_id)
        .bind(params.expected_status)
        .bind(params.patch.time_in)
        .bind(params.patch.time_out)
        .bind(params.patch.break_minutes)
        .bind(params.patch.total_hours)
        .bind(params.patch.status)
        .bind(params.patch.company_notes)
        .bind(params.patch.dean_notes)
        .fetch_optional(&self.pool)
        .await?
        .map(|row| row.into());

        Ok(result)
    }

    async fn update_entries_where(&self, params: BulkUpdateDBParams) -> Result<u64, Error> {
        let result = sqlx::query(
            "update timesheet_entries set status = $1, updated_at = now() \
             where student_id = $2 and status = $3 \
               and ($4::uuid is null or company_id = $4) \
               and ($5::date is null or entry_date >= $5) \
               and ($6::date is null or entry_date <= $6)",
        )
        .bind(params.to_status)
        .bind(params.student_id)
        .bind(params.from_status)
        .bind(params.company_id)
        .bind(params.from)
        .bind(params.to)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
