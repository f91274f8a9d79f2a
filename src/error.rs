// ─── Error ──────────────────────────────────────────────────────────────────
use crate::db::DbError;
use thiserror::Error;

/// Expected failure classes a caller is meant to inspect and report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidIdentifier,
    NotFound,
    AmbiguousMatch,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{reason}")]
    InvalidIdentifier { reason: String },
    #[error("{reason}")]
    NotFound { reason: String },
    #[error("{reason}")]
    AmbiguousMatch { reason: String },
    /// Storage fault. Never produced for bad input or missing data.
    #[error("storage fault: {0}")]
    Storage(#[from] DbError),
}

impl StoreError {
    pub fn invalid_message_id(message_id: &str) -> Self {
        StoreError::InvalidIdentifier {
            reason: format!(
                "Invalid 'message_id' format. Must be '^[0-9A-Fa-f]{{4}}$', but got '{message_id}'."
            ),
        }
    }

    pub fn message_not_found(message_id: &str) -> Self {
        StoreError::NotFound {
            reason: format!("Message with ID '{message_id}' does not exist."),
        }
    }

    pub fn field_not_found(message_id: &str, name: &str) -> Self {
        StoreError::NotFound {
            reason: format!("No matching fields found for '{name}' in message '{message_id}'."),
        }
    }

    pub fn ambiguous_field(message_id: &str, name: &str) -> Self {
        StoreError::AmbiguousMatch {
            reason: format!("Multiple results found for '{name}' in message '{message_id}'. Expected 1."),
        }
    }

    /// `None` for storage faults.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StoreError::InvalidIdentifier { .. } => Some(ErrorKind::InvalidIdentifier),
            StoreError::NotFound { .. } => Some(ErrorKind::NotFound),
            StoreError::AmbiguousMatch { .. } => Some(ErrorKind::AmbiguousMatch),
            StoreError::Storage(_) => None,
        }
    }

    pub fn is_fault(&self) -> bool {
        self.kind().is_none()
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
