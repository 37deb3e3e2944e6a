use crate::domain::directory::{AssignedCompanyParams, AssignmentPort, DirectoryError};
use crate::outbound::db::error::Error;
use crate::outbound::db::repository::Repository;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl AssignmentPort for Repository {
    async fn assigned_company(
        &self,
        params: AssignedCompanyParams,
    ) -> Result<Option<Uuid>, DirectoryError> {
        let company = sqlx::query_scalar::<_, Uuid>(
            "select company_id from company_assignments where student_id = $1",
        )
        .bind(params.student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::DatabaseError)?;

        Ok(company)
    }
}
