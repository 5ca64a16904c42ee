//! Error taxonomy for agency operations

use thiserror::Error;

/// Result type alias using the agency error
pub type Result<T> = std::result::Result<T, AgencyError>;

#[derive(Debug, Error)]
pub enum AgencyError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The operation is forbidden by completion or assignment state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Breed catalog error: {0}")]
    Breeds(String),
}

/// Caller-visible failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    ValidationFailed,
    Internal,
}

impl ErrorKind {
    /// HTTP status equivalent
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::InvalidState => 409,
            ErrorKind::ValidationFailed => 422,
            ErrorKind::Internal => 500,
        }
    }

    /// Process exit code used by the command line
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::NotFound => 3,
            ErrorKind::InvalidState => 4,
            ErrorKind::ValidationFailed => 5,
            ErrorKind::Internal => 1,
        }
    }
}

impl AgencyError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AgencyError::NotFound { entity, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AgencyError::NotFound { .. } => ErrorKind::NotFound,
            AgencyError::InvalidState(_) => ErrorKind::InvalidState,
            AgencyError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            AgencyError::Database(_) | AgencyError::Io(_) | AgencyError::Breeds(_) => {
                ErrorKind::Internal
            }
        }
    }
}
