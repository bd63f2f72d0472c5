use crate::domain::portfolio::UnknownLanguages;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("database query failed: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("failed to apply schema migrations: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// The targeted project row does not exist.
    #[error("project not found")]
    NotFound,

    #[error(transparent)]
    InvalidLanguages(#[from] UnknownLanguages),
}
