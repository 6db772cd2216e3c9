use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
    /// The pooled connection stopped working mid-operation.
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("cannot connect to {target}: {message}")]
    Connection { target: String, message: String },
}

impl ModelError {
    pub fn from_db(e: DbErr) -> Self {
        match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::Unavailable(e.to_string()),
            other => Self::Db(other.to_string()),
        }
    }

    /// Whether the cached connection handle should be thrown away.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Connection { .. })
    }
}
