mod read_op;
mod write_op;

use crate::db::{DbError, FieldDb};
use std::path::Path;

/// Owns every field record and exposes both the flat field view and the
/// grouped message view.
///
/// Expected failures (bad identifier, nothing found, ambiguous match) come
/// back as the matching [`StoreError`](crate::error::StoreError) variant;
/// storage faults come back as `StoreError::Storage`.
pub struct FieldStore {
    db: FieldDb,
}

impl FieldStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Ok(Self::with_db(FieldDb::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Ok(Self::with_db(FieldDb::open_in_memory()?))
    }

    pub fn with_db(db: FieldDb) -> Self {
        Self { db }
    }
}

#[cfg(test)]
mod tests;
