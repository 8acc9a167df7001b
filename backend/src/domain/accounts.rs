//! Account use-cases: registration, authentication, profile access, and
//! cascade account deletion.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::auth::{LoginCredentials, Registration};
use crate::domain::error::Error;
use crate::domain::identity::{authorize_owner, Identity};
use crate::domain::note::Note;
use crate::domain::password::PasswordHash;
use crate::domain::ports::{
    NoteRepository, NoteRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::user::{User, Username};

/// Profile of an account together with the notes it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user: User,
    pub notes: Vec<Note>,
}

/// Registration, login, and account lifecycle service.
///
/// Holds the credential store and (for the deletion cascade) the note
/// store behind their ports, so tests can substitute doubles.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl AccountService {
    /// Build the service from its store ports.
    pub fn new(users: Arc<dyn UserRepository>, notes: Arc<dyn NoteRepository>) -> Self {
        Self { users, notes }
    }

    /// Register a new account.
    ///
    /// The username pre-check keeps the common failure cheap; the store's
    /// own uniqueness constraint is what actually guards against a
    /// concurrent registration racing past the check. On failure nothing
    /// is written.
    pub async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username();
        if self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(user_store_error)?
            .is_some()
        {
            return Err(Error::username_taken(format!(
                "username {username} is already taken"
            )));
        }

        let hash = PasswordHash::from_plaintext(registration.password())
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;
        let user = User::new(
            username.clone(),
            hash,
            registration.email().clone(),
            registration.first_name(),
            registration.last_name(),
        );
        self.users.insert(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateUsername { username } => {
                Error::username_taken(format!("username {username} is already taken"))
            }
            other => user_store_error(other),
        })?;
        info!(username = %username, "account registered");
        Ok(user)
    }

    /// Verify login credentials.
    ///
    /// Unknown username and wrong password return the identical generic
    /// error; the unknown-user path still performs one hash verification
    /// so the two cases cost comparable time.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(user_store_error)?;
        let Some(user) = found else {
            crate::domain::password::dummy_verify(credentials.password());
            debug!("login failed");
            return Err(Error::invalid_credentials());
        };
        let matches = user
            .password_hash()
            .verify(credentials.password())
            .map_err(|err| Error::internal(format!("stored hash unusable: {err}")))?;
        if matches {
            debug!(username = %user.username(), "login verified");
            Ok(user)
        } else {
            debug!("login failed");
            Err(Error::invalid_credentials())
        }
    }

    /// Fetch an account profile and its notes. Only the owner may look.
    pub async fn profile(
        &self,
        identity: &Identity,
        username: &Username,
    ) -> Result<ProfileView, Error> {
        authorize_owner(identity, username)?;
        let user = self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(user_store_error)?
            .ok_or_else(|| Error::not_found(format!("no account named {username}")))?;
        let notes = self
            .notes
            .list_by_owner(username)
            .await
            .map_err(note_store_error)?;
        Ok(ProfileView { user, notes })
    }

    /// Delete an account and cascade to its notes. Only the owner may
    /// delete; the caller is responsible for clearing the now-dangling
    /// session identity afterwards.
    pub async fn delete_account(
        &self,
        identity: &Identity,
        username: &Username,
    ) -> Result<(), Error> {
        authorize_owner(identity, username)?;
        let removed_notes = self
            .notes
            .delete_by_owner(username)
            .await
            .map_err(note_store_error)?;
        let removed = self
            .users
            .delete(username)
            .await
            .map_err(user_store_error)?;
        if !removed {
            return Err(Error::not_found(format!("no account named {username}")));
        }
        info!(username = %username, notes = removed_notes, "account deleted");
        Ok(())
    }
}

fn user_store_error(err: UserRepositoryError) -> Error {
    Error::internal(format!("user store failure: {err}"))
}

fn note_store_error(err: NoteRepositoryError) -> Error {
    Error::internal(format!("note store failure: {err}"))
}
