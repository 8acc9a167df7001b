//! Note use-cases: creation under an owner and owner-only updates.

use std::sync::Arc;

use tracing::info;

use crate::domain::error::Error;
use crate::domain::identity::{authorize_owner, Identity};
use crate::domain::note::{Note, NoteDraft, NoteId, NotePatch};
use crate::domain::ports::{
    NoteRepository, NoteRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::user::Username;

/// Note creation and update service.
#[derive(Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteRepository>,
    users: Arc<dyn UserRepository>,
}

impl NoteService {
    /// Build the service from its store ports.
    pub fn new(notes: Arc<dyn NoteRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { notes, users }
    }

    /// Create a note under `owner`. Only the owner may add to their own
    /// collection; the owner account must still exist.
    pub async fn add_note(
        &self,
        identity: &Identity,
        owner: &Username,
        draft: &NoteDraft,
    ) -> Result<Note, Error> {
        authorize_owner(identity, owner)?;
        // A session can outlive its account only briefly (self-deletion
        // clears it), but the store stays consistent regardless.
        if self
            .users
            .find_by_username(owner.as_ref())
            .await
            .map_err(user_store_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("no account named {owner}")));
        }
        let note = self
            .notes
            .insert(owner, draft)
            .await
            .map_err(note_store_error)?;
        info!(owner = %owner, note_id = %note.id(), "note created");
        Ok(note)
    }

    /// Update a note's title and/or content. Ownership is decided by the
    /// stored note's owner, never by anything in the request path, and
    /// absent patch fields keep the stored values.
    pub async fn update_note(
        &self,
        identity: &Identity,
        id: NoteId,
        patch: &NotePatch,
    ) -> Result<Note, Error> {
        // Authentication is checked before the lookup so anonymous
        // callers learn nothing about which note ids exist.
        let caller = identity.require()?;
        let existing = self
            .notes
            .find_by_id(id)
            .await
            .map_err(note_store_error)?
            .ok_or_else(|| Error::not_found(format!("no note with id {id}")))?;
        if existing.owner() != caller {
            return Err(Error::forbidden(format!(
                "not permitted to act on {}'s resources",
                existing.owner()
            )));
        }
        let updated = self
            .notes
            .update(id, patch)
            .await
            .map_err(note_store_error)?
            .ok_or_else(|| Error::not_found(format!("no note with id {id}")))?;
        info!(owner = %caller, note_id = %id, "note updated");
        Ok(updated)
    }
}

fn user_store_error(err: UserRepositoryError) -> Error {
    Error::internal(format!("user store failure: {err}"))
}

fn note_store_error(err: NoteRepositoryError) -> Error {
    Error::internal(format!("note store failure: {err}"))
}
