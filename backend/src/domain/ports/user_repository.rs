//! Port abstraction for the credential store.
use async_trait::async_trait;

use crate::domain::user::{User, Username};

/// Persistence errors raised by credential store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Insert violated the username uniqueness constraint. The store is
    /// the authority for uniqueness; service-level pre-checks are only
    /// an optimization.
    #[error("username {username} is already registered")]
    DuplicateUsername { username: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    /// Build a [`Self::DuplicateUsername`] error.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }

    /// Build a [`Self::Query`] error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for user record storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record; the existence check and the insert are
    /// one atomic operation with respect to concurrent registrations.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by username. Takes a raw string so login lookups for
    /// structurally invalid names simply find nothing.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<User>, UserRepositoryError>;

    /// Remove a user record; returns whether a record existed.
    async fn delete(&self, username: &Username) -> Result<bool, UserRepositoryError>;
}
