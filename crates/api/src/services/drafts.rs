//! In-memory draft sessions.
//!
//! Each draft is one producer's private tree, held server-side from the
//! moment it is opened until it is submitted or discarded. Drafts are never
//! shared between producers, and a draft abandoned mid-edit simply stays
//! here until discarded.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::draft::EventDraft;

/// Errors raised by draft session lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftStoreError {
    #[error("Draft not found")]
    NotFound,

    /// The draft exists but belongs to another producer.
    #[error("Draft belongs to another producer")]
    NotOwner,
}

struct DraftEntry {
    producer_id: Uuid,
    draft: EventDraft,
}

/// Holds every open draft, keyed by draft id.
#[derive(Clone, Default)]
pub struct DraftStore {
    inner: Arc<RwLock<HashMap<Uuid, DraftEntry>>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a draft session for the producer and returns its id.
    pub async fn create(&self, producer_id: Uuid, draft: EventDraft) -> Uuid {
        let draft_id = Uuid::new_v4();
        self.inner
            .write()
            .await
            .insert(draft_id, DraftEntry { producer_id, draft });
        draft_id
    }

    /// A snapshot of the producer's draft.
    pub async fn snapshot(
        &self,
        draft_id: Uuid,
        producer_id: Uuid,
    ) -> Result<EventDraft, DraftStoreError> {
        let guard = self.inner.read().await;
        let entry = guard.get(&draft_id).ok_or(DraftStoreError::NotFound)?;
        if entry.producer_id != producer_id {
            return Err(DraftStoreError::NotOwner);
        }
        Ok(entry.draft.clone())
    }

    /// Runs a closure against the producer's draft, returning its result.
    pub async fn with_draft<T>(
        &self,
        draft_id: Uuid,
        producer_id: Uuid,
        f: impl FnOnce(&mut EventDraft) -> T,
    ) -> Result<T, DraftStoreError> {
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(&draft_id).ok_or(DraftStoreError::NotFound)?;
        if entry.producer_id != producer_id {
            return Err(DraftStoreError::NotOwner);
        }
        Ok(f(&mut entry.draft))
    }

    /// Closes a draft session and returns its final state.
    pub async fn remove(
        &self,
        draft_id: Uuid,
        producer_id: Uuid,
    ) -> Result<EventDraft, DraftStoreError> {
        let mut guard = self.inner.write().await;
        match guard.get(&draft_id) {
            None => Err(DraftStoreError::NotFound),
            Some(entry) if entry.producer_id != producer_id => Err(DraftStoreError::NotOwner),
            Some(_) => Ok(guard
                .remove(&draft_id)
                .map(|entry| entry.draft)
                .unwrap_or_default()),
        }
    }
}

impl From<DraftStoreError> for crate::error::ApiError {
    fn from(err: DraftStoreError) -> Self {
        match err {
            DraftStoreError::NotFound => crate::error::ApiError::NotFound("Draft not found".into()),
            DraftStoreError::NotOwner => {
                crate::error::ApiError::Forbidden("Draft belongs to another producer".into())
            }
        }
    }
}
