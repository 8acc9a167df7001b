//! In-process store adapters.
//!
//! Each store serializes its logical operations behind one mutex, which
//! makes it the authority for the invariants the services rely on: the
//! username uniqueness check-then-insert and the note patch
//! read-then-write each happen in a single critical section, so two
//! racing registrations cannot both win and concurrent patches of the
//! same note are applied one after the other. No lock is ever held
//! across an await.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::note::{Note, NoteDraft, NoteId, NotePatch};
use crate::domain::ports::{
    NoteRepository, NoteRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::user::{User, Username};

/// Credential store keyed by username.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    records: Mutex<HashMap<String, User>>,
}

impl MemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| UserRepositoryError::query("user store lock poisoned"))?;
        let key = user.username().as_ref().to_owned();
        if records.contains_key(&key) {
            return Err(UserRepositoryError::duplicate_username(key));
        }
        records.insert(key, user.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserRepositoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| UserRepositoryError::query("user store lock poisoned"))?;
        Ok(records.get(username).cloned())
    }

    async fn delete(&self, username: &Username) -> Result<bool, UserRepositoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| UserRepositoryError::query("user store lock poisoned"))?;
        Ok(records.remove(username.as_ref()).is_some())
    }
}

#[derive(Debug, Default)]
struct NoteRecords {
    next_id: i64,
    by_id: BTreeMap<i64, Note>,
}

/// Note store with sequential id assignment starting at 1.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    records: Mutex<NoteRecords>,
}

impl MemoryNoteRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error() -> NoteRepositoryError {
    NoteRepositoryError::query("note store lock poisoned")
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn insert(
        &self,
        owner: &Username,
        draft: &NoteDraft,
    ) -> Result<Note, NoteRepositoryError> {
        let mut records = self.records.lock().map_err(|_| lock_error())?;
        records.next_id += 1;
        let id = records.next_id;
        let note = Note::new(
            NoteId::new(id),
            draft.title().clone(),
            draft.content(),
            owner.clone(),
        );
        records.by_id.insert(id, note.clone());
        Ok(note)
    }

    async fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, NoteRepositoryError> {
        let records = self.records.lock().map_err(|_| lock_error())?;
        Ok(records.by_id.get(&id.get()).cloned())
    }

    async fn update(
        &self,
        id: NoteId,
        patch: &NotePatch,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let mut records = self.records.lock().map_err(|_| lock_error())?;
        let Some(note) = records.by_id.get_mut(&id.get()) else {
            return Ok(None);
        };
        note.apply(patch);
        Ok(Some(note.clone()))
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Note>, NoteRepositoryError> {
        let records = self.records.lock().map_err(|_| lock_error())?;
        Ok(records
            .by_id
            .values()
            .filter(|note| note.owner() == owner)
            .cloned()
            .collect())
    }

    async fn delete_by_owner(&self, owner: &Username) -> Result<u64, NoteRepositoryError> {
        let mut records = self.records.lock().map_err(|_| lock_error())?;
        let before = records.by_id.len();
        records.by_id.retain(|_, note| note.owner() != owner);
        Ok((before - records.by_id.len()) as u64)
    }
}
