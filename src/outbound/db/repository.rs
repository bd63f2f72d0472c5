use crate::outbound::db::connection::Db;
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Clone)]
pub struct Repository {
    pub(crate) pool: PgPool,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn from_db(db: &Db) -> Self {
        Self::new(db.pool())
    }

    pub(crate) async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
