pub mod config;
pub mod db;
pub mod error;
pub mod field_value;
pub mod http;
pub mod identifier;
pub mod record;
pub mod store;

pub use error::{ErrorKind, StoreError, StoreResult};
pub use field_value::{FieldNumber, FieldValue};
pub use identifier::MessageId;
pub use record::{FieldRecord, Message};
pub use store::FieldStore;
