//! Port abstraction for the note store.
use async_trait::async_trait;

use crate::domain::note::{Note, NoteDraft, NoteId, NotePatch};
use crate::domain::user::Username;

/// Persistence errors raised by note store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteRepositoryError {
    /// Query or mutation failed during execution.
    #[error("note store query failed: {message}")]
    Query { message: String },
}

impl NoteRepositoryError {
    /// Build a [`Self::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for note storage and retrieval.
///
/// Identifier assignment and patch application live behind this trait so
/// the read-then-conditional-write of an update is atomic with respect
/// to concurrent updates of the same note.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a draft under the given owner, assigning the next id.
    async fn insert(
        &self,
        owner: &Username,
        draft: &NoteDraft,
    ) -> Result<Note, NoteRepositoryError>;

    /// Fetch a note by identifier.
    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteRepositoryError>;

    /// Apply a patch to a stored note in one atomic step; absent patch
    /// fields keep the stored values. Returns the updated note, or
    /// `None` when the id is absent.
    async fn update(
        &self,
        id: NoteId,
        patch: &NotePatch,
    ) -> Result<Option<Note>, NoteRepositoryError>;

    /// List all notes owned by a user, ordered by id.
    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Remove every note owned by a user (account-deletion cascade);
    /// returns the number of notes removed.
    async fn delete_by_owner(&self, owner: &Username) -> Result<u64, NoteRepositoryError>;
}
