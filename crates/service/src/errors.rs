use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn conflict(msg: impl Into<String>) -> Self { Self::Conflict(msg.into()) }

    /// True for failures caused by the request rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Conflict(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

/// Constraint violations reported by the store are conflicts; everything else
/// is an internal failure.
impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::Conflict(msg),
            // SQLite reports RESTRICT (code 1811) without a foreign-key classification
            _ if is_sqlite_fk_failure(&e) => Self::Conflict(e.to_string()),
            _ => Self::Db(e.to_string()),
        }
    }
}

fn is_sqlite_fk_failure(e: &DbErr) -> bool {
    matches!(e, DbErr::Exec(_) | DbErr::Query(_)) && e.to_string().contains("FOREIGN KEY constraint failed")
}
