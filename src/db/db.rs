use super::types::DbError;
use crate::record::FieldRecord;
use redb::backends::InMemoryBackend;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

// Table definitions
// Key: (message_id, field name)
// Value: JSON document {"message_id", "name", "value"}
const FIELDS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("fields");

/// Flat document collection of field records, one redb file per instance.
///
/// The tuple key makes `(message_id, name)` unique: an upsert is a single
/// `insert` inside one write transaction, so a concurrent reader sees either
/// the old document or the new one, never both.
pub struct FieldDb {
    db: Database,
}

impl FieldDb {
    /// Open or create the database at the specified path.
    /// Also ensures that the fields table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Volatile database, gone when dropped.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> Result<Self, DbError> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(FIELDS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Every stored document, in key order.
    pub fn scan(&self) -> Result<Vec<FieldRecord>, DbError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FIELDS_TABLE)?;

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, doc) = entry?;
            let record: FieldRecord = serde_json::from_slice(doc.value())?;
            records.push(record);
        }
        Ok(records)
    }

    /// Documents stored under `message_id`.
    pub fn scan_message(&self, message_id: &str) -> Result<Vec<FieldRecord>, DbError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FIELDS_TABLE)?;

        let mut records = Vec::new();
        for entry in table.range((message_id, "")..)? {
            let (key, doc) = entry?;
            if key.value().0 != message_id {
                break;
            }
            let record: FieldRecord = serde_json::from_slice(doc.value())?;
            if record.message_id == message_id {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Replace-or-insert keyed on `(message_id, name)`.
    /// Returns true if a previous document was replaced.
    pub fn upsert(&self, record: &FieldRecord) -> Result<bool, DbError> {
        // Encode before taking the write lock.
        let doc = serde_json::to_vec(record)?;

        let write_txn = self.db.begin_write()?;
        let replaced = {
            let mut table = write_txn.open_table(FIELDS_TABLE)?;
            table
                .insert((record.message_id.as_str(), record.name.as_str()), doc.as_slice())?
                .is_some()
        };
        write_txn.commit()?;
        Ok(replaced)
    }

    /// Remove every document under `message_id`. Returns how many were removed.
    pub fn remove_message(&self, message_id: &str) -> Result<usize, DbError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(FIELDS_TABLE)?;
            let mut names = Vec::new();
            for entry in table.range((message_id, "")..)? {
                let (key, _) = entry?;
                let (id, name) = key.value();
                if id != message_id {
                    break;
                }
                names.push(name.to_owned());
            }
            for name in &names {
                table.remove((message_id, name.as_str()))?;
            }
            names.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    /// Remove one document. Returns true if it existed.
    pub fn remove_field(&self, message_id: &str, name: &str) -> Result<bool, DbError> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(FIELDS_TABLE)?;
            table.remove((message_id, name))?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Remove every document. Returns how many were removed.
    pub fn truncate(&self) -> Result<usize, DbError> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(FIELDS_TABLE)?;
            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                let (id, name) = key.value();
                keys.push((id.to_owned(), name.to_owned()));
            }
            for (id, name) in &keys {
                table.remove((id.as_str(), name.as_str()))?;
            }
            keys.len()
        };
        write_txn.commit()?;
        Ok(removed)
    }

    pub fn len(&self) -> Result<u64, DbError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(FIELDS_TABLE)?;
        Ok(table.len()?)
    }

    /// Write a raw document under an arbitrary key, bypassing the pair
    /// invariant. Only for exercising corruption handling in tests.
    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: (&str, &str), doc: &[u8]) -> Result<(), DbError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(FIELDS_TABLE)?;
            table.insert(key, doc)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
