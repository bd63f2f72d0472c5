use crate::outbound::db::error::Error;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

const MAX_CONNECTIONS: u32 = 5;

#[derive(Clone)]
pub struct Db {
    pool: Pool<Postgres>,
}

impl Db {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(connection_string)
            .await?;

        Ok(Self::new(pool))
    }

    /// Applies the schema and seeds the language catalog.
    pub async fn migrate(&self) -> Result<(), Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;

        Ok(())
    }

    pub fn pool(&self) -> Pool<Postgres> {
        self.pool.clone()
    }
}
