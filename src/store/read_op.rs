use super::FieldStore;
use crate::error::{StoreError, StoreResult};
use crate::identifier::MessageId;
use crate::record::{FieldRecord, Message};
use rustc_hash::FxHashMap;

impl FieldStore {
    /// Every stored record, in storage scan order.
    pub fn list_all_fields(&self) -> StoreResult<Vec<FieldRecord>> {
        Ok(self.db.scan()?)
    }

    /// One message per distinct `message_id`, ordered by first appearance in
    /// the scan.
    pub fn list_all_messages(&self) -> StoreResult<Vec<Message>> {
        let mut messages: Vec<Message> = Vec::new();
        let mut slots: FxHashMap<String, usize> = FxHashMap::default();

        for record in self.list_all_fields()? {
            let slot = match slots.get(&record.message_id) {
                Some(&slot) => slot,
                None => {
                    slots.insert(record.message_id.clone(), messages.len());
                    messages.push(Message::new(record.message_id.clone()));
                    messages.len() - 1
                }
            };
            messages[slot].absorb(record);
        }
        Ok(messages)
    }

    pub fn get_message(&self, message_id: &str) -> StoreResult<Message> {
        let id = MessageId::parse(message_id)?;
        let records = self.db.scan_message(id.as_str())?;
        if records.is_empty() {
            return Err(StoreError::message_not_found(id.as_str()));
        }
        Ok(Message::from_records(id.into_string(), records))
    }

    /// The single record for `(message_id, name)`. `name` is free-form.
    pub fn get_field(&self, message_id: &str, name: &str) -> StoreResult<FieldRecord> {
        let id = MessageId::parse(message_id)?;
        let mut matches: Vec<FieldRecord> = self
            .db
            .scan_message(id.as_str())?
            .into_iter()
            .filter(|record| record.name == name)
            .collect();

        match matches.len() {
            0 => Err(StoreError::field_not_found(id.as_str(), name)),
            1 => Ok(matches.remove(0)),
            _ => Err(StoreError::ambiguous_field(id.as_str(), name)),
        }
    }

    /// Number of stored field records.
    pub fn count_fields(&self) -> StoreResult<u64> {
        Ok(self.db.len()?)
    }
}
