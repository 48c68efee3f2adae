//! The module contains the error the engine can throw.
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("category {0} does not exist")]
    UnknownCategory(i32),
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for EngineError {
    /// The only place database errors are inspected. A unique-index violation
    /// becomes [`ExistingKey`]; anything else stays a [`Database`] error.
    ///
    /// [`ExistingKey`]: EngineError::ExistingKey
    /// [`Database`]: EngineError::Database
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => EngineError::ExistingKey(detail),
            _ => EngineError::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::UnknownCategory(a), Self::UnknownCategory(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
