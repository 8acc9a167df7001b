//! Authentication value objects: login credentials and registrations.
//!
//! Keep inbound payload parsing outside the domain by exposing
//! constructors that validate string inputs before a handler talks to a
//! service. Password buffers are wrapped in [`Zeroizing`] so plaintexts
//! are wiped when dropped.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::user::{Email, UserValidationError, Username};

/// Domain error returned when a login payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty after trimming. It is kept as a
///   plain string rather than a [`Username`]: a login attempt naming a
///   structurally invalid username must fail with the same generic
///   credentials error as any other unknown name, not a validation error.
/// - `password` is non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for credential-store lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a registration payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// A user field failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(err: UserValidationError) -> Self {
        Self::User(err)
    }
}

/// Validated registration request for a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
    email: Email,
    first_name: String,
    last_name: String,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        let email = Email::new(email)?;
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName.into());
        }
        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName.into());
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
            email,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
        })
    }

    /// Requested account identifier.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password to hash; never persisted as-is.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Contact email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.last_name.as_str()
    }
}
