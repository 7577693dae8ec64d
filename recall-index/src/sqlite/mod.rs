//! SQLite-backed chunk store with exact nearest-neighbor scan.

pub mod pragmas;
pub mod schema;
pub mod search;
mod store;

pub use store::SqliteVectorIndex;

use recall_core::errors::IndexError;

pub(crate) fn to_storage_err(message: impl Into<String>) -> IndexError {
    IndexError::StorageError {
        message: message.into(),
    }
}
