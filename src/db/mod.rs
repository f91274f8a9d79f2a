pub mod db;
pub mod types;

pub use db::FieldDb;
pub use types::DbError;
