use sqlx::{Pool, Postgres};

#[derive(Clone)]
pub struct Db {
    pool: Pool<Postgres>,
}

impl Db {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> Pool<Postgres> {
        self.pool.clone()
    }
}
