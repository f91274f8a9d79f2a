use thiserror::Error;

/// Faults from the storage layer. These are not part of the expected
/// failure taxonomy and are surfaced to callers unchanged.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),
    #[error("document codec error: {0}")]
    Document(#[from] serde_json::Error),
}

impl From<redb::DatabaseError> for DbError {
    fn from(e: redb::DatabaseError) -> Self {
        DbError::Redb(e.into())
    }
}

impl From<redb::TransactionError> for DbError {
    fn from(e: redb::TransactionError) -> Self {
        DbError::Redb(e.into())
    }
}

impl From<redb::TableError> for DbError {
    fn from(e: redb::TableError) -> Self {
        DbError::Redb(e.into())
    }
}

impl From<redb::CommitError> for DbError {
    fn from(e: redb::CommitError) -> Self {
        DbError::Redb(e.into())
    }
}

impl From<redb::StorageError> for DbError {
    fn from(e: redb::StorageError) -> Self {
        DbError::Redb(e.into())
    }
}
