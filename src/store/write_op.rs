use super::FieldStore;
use crate::error::StoreResult;
use crate::field_value::FieldValue;
use crate::identifier::{MessageId, is_valid_message_id};
use crate::record::{FieldRecord, Message};
use tracing::debug;

impl FieldStore {
    // ════════════════════════════════════════════════════════════════════════
    // Upserts
    // ════════════════════════════════════════════════════════════════════════

    /// Insert or replace the record for `(message_id, name)`.
    /// First write and overwrite look the same to the caller.
    pub fn upsert_field(
        &self,
        message_id: &str,
        name: &str,
        value: FieldValue,
    ) -> StoreResult<FieldRecord> {
        let id = MessageId::parse(message_id)?;
        let record = FieldRecord::new(id.into_string(), name, value);
        let replaced = self.db.upsert(&record)?;
        debug!(event = "field_upsert", message_id = %record.message_id, name = %record.name, replaced);
        Ok(record)
    }

    /// Upsert each field in iteration order, then return the whole message.
    ///
    /// Not atomic across fields: if one upsert fails, the ones before it stay
    /// applied.
    pub fn upsert_message<I, K>(&self, message_id: &str, fields: I) -> StoreResult<Message>
    where
        I: IntoIterator<Item = (K, FieldValue)>,
        K: AsRef<str>,
    {
        let id = MessageId::parse(message_id)?;
        for (name, value) in fields {
            self.upsert_field(id.as_str(), name.as_ref(), value)?;
        }
        self.get_message(id.as_str())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Deletes: no validation, absence is not an error
    // ════════════════════════════════════════════════════════════════════════

    pub fn delete_message(&self, message_id: &str) -> StoreResult<()> {
        if !is_valid_message_id(message_id) {
            debug!(event = "message_delete_noop", message_id, reason = "malformed id");
            return Ok(());
        }
        let removed = self.db.remove_message(message_id)?;
        debug!(event = "message_delete", message_id, removed);
        Ok(())
    }

    pub fn delete_field(&self, message_id: &str, name: &str) -> StoreResult<()> {
        if !is_valid_message_id(message_id) {
            debug!(event = "field_delete_noop", message_id, name, reason = "malformed id");
            return Ok(());
        }
        let existed = self.db.remove_field(message_id, name)?;
        debug!(event = "field_delete", message_id, name, existed);
        Ok(())
    }

    /// Drop every record. Administrative use only.
    pub fn clear_all(&self) -> StoreResult<()> {
        let removed = self.db.truncate()?;
        debug!(event = "store_clear", removed);
        Ok(())
    }
}
