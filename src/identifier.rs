use crate::error::StoreError;
use serde::Serialize;

pub const MESSAGE_ID_LEN: usize = 4;

/// A validated message identifier: exactly four hex digits, case preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        if is_valid_message_id(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(StoreError::invalid_message_id(raw))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[inline]
pub fn is_valid_message_id(raw: &str) -> bool {
    raw.len() == MESSAGE_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
}
