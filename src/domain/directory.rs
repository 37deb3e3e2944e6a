//! Assignment lookup, owned by the surrounding portal. This service only
//! reads which company currently reviews a given student.

use crate::outbound::db::error::Error as DatabaseError;
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AssignmentPort: Send + Sync + 'static {
    async fn assigned_company(
        &self,
        params: AssignedCompanyParams,
    ) -> Result<Option<Uuid>, DirectoryError>;
}

pub struct AssignedCompanyParams {
    pub student_id: Uuid,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to look up the assigned company")]
    DatabaseError(#[from] DatabaseError),
}
