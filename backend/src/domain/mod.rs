//! Domain primitives, services, and the authorization policy.
//!
//! Everything in this module is transport agnostic: inbound adapters map
//! requests into the validated value objects defined here, services
//! apply the ownership policy and talk to the stores through ports, and
//! failures surface as the central [`Error`] type.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod identity;
pub mod note;
pub mod notes;
pub mod password;
pub mod ports;
pub mod user;

pub use self::accounts::{AccountService, ProfileView};
pub use self::auth::{
    LoginCredentials, LoginValidationError, Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{authorize_owner, Identity};
pub use self::note::{Note, NoteDraft, NoteId, NotePatch, NoteTitle, NoteValidationError};
pub use self::notes::NoteService;
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::user::{Email, User, UserValidationError, Username};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
