//! Application services.

pub mod drafts;
pub mod storage;

pub use drafts::{DraftStore, DraftStoreError};
pub use storage::{MediaStorage, StorageError};
