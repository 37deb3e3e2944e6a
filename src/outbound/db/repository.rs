use sqlx::PgPool;

/// The one sqlx-backed adapter; it implements every store port this
/// service consumes.
#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: PgPool,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
