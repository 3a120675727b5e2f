use rusqlite::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the warehouse. None of them is retried.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("Cannot open database {path:?}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid database schema: {0}")]
    InvalidSchema(String),

    #[error("Schema provisioning failed: {0}")]
    Provisioning(String),

    #[error("Constraint violation: {0}")]
    Constraint(rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for WarehouseError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => WarehouseError::Constraint(err),
            _ => WarehouseError::Sqlite(err),
        }
    }
}
