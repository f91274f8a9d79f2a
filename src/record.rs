use crate::field_value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The persisted unit. Serialized as `{"message_id", "name", "value"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub message_id: String,
    pub name: String,
    #[serde(default)]
    pub value: FieldValue,
}

impl FieldRecord {
    pub fn new(message_id: impl Into<String>, name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            message_id: message_id.into(),
            name: name.into(),
            value,
        }
    }
}

/// A message is never stored; it is rebuilt from its field records on read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    pub message_id: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Message {
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Fold records into the message. A later record overwrites an earlier one
    /// with the same name.
    pub fn absorb(&mut self, record: FieldRecord) {
        debug_assert_eq!(record.message_id, self.message_id);
        self.fields.insert(record.name, record.value);
    }

    pub fn from_records(
        message_id: impl Into<String>,
        records: impl IntoIterator<Item = FieldRecord>,
    ) -> Self {
        let mut message = Self::new(message_id);
        for record in records {
            message.absorb(record);
        }
        message
    }
}
