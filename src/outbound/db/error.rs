use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error with sqlx")]
    DatabaseError(#[from] sqlx::Error),

    #[error("the record could not be found")]
    NotFound,

    #[error("a record for that key already exists")]
    OnConflict,
}
