//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on the domain services and remain testable without real I/O.

use std::sync::Arc;

use crate::domain::ports::{NoteRepository, UserRepository};
use crate::domain::{AccountService, NoteService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountService>,
    pub notes: Arc<NoteService>,
}

impl HttpState {
    /// Wire both services over a shared pair of store ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::persistence::{MemoryNoteRepository, MemoryUserRepository};
    ///
    /// let state = HttpState::new(
    ///     Arc::new(MemoryUserRepository::new()),
    ///     Arc::new(MemoryNoteRepository::new()),
    /// );
    /// let _accounts = state.accounts.clone();
    /// ```
    pub fn new(users: Arc<dyn UserRepository>, notes: Arc<dyn NoteRepository>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(users.clone(), notes.clone())),
            notes: Arc::new(NoteService::new(notes, users)),
        }
    }
}
