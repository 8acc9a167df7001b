//! Password hashing and verification (Argon2id).
//!
//! Each hash is produced with a fresh random salt from the OS RNG and
//! stored as a PHC-format string, so two accounts sharing a plaintext
//! never share a stored digest. Verification is delegated to the
//! `argon2` crate, which compares in constant time.

use std::fmt;
use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Errors raised while hashing or parsing a stored digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordHashError {
    /// The hashing operation itself failed.
    Hashing { message: String },
    /// A stored digest could not be parsed as a PHC string.
    MalformedHash { message: String },
}

impl fmt::Display for PasswordHashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashing { message } => write!(f, "password hashing failed: {message}"),
            Self::MalformedHash { message } => {
                write!(f, "stored password hash is malformed: {message}")
            }
        }
    }
}

impl std::error::Error for PasswordHashError {}

/// Salted one-way password digest in PHC string format.
///
/// The `Debug` implementation is redacted so a digest can never end up
/// in logs via a derived formatter.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a fresh random salt.
    pub fn from_plaintext(plaintext: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hashing {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Rehydrate a digest previously produced by [`Self::from_plaintext`].
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        argon2::password_hash::PasswordHash::new(&phc).map_err(|err| {
            PasswordHashError::MalformedHash {
                message: err.to_string(),
            }
        })?;
        Ok(Self(phc))
    }

    /// Check a plaintext candidate against this digest.
    pub fn verify(&self, plaintext: &str) -> Result<bool, PasswordHashError> {
        let parsed = argon2::password_hash::PasswordHash::new(&self.0).map_err(|err| {
            PasswordHashError::MalformedHash {
                message: err.to_string(),
            }
        })?;
        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }

    /// PHC-format representation for persistence.
    pub fn as_phc_string(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

static DUMMY_HASH: OnceLock<PasswordHash> = OnceLock::new();

/// Run a verification against a throwaway digest.
///
/// Used when a login names an unknown username: the handler still pays
/// the cost of one Argon2 verification so the unknown-user path is not
/// observably faster than the wrong-password path.
pub fn dummy_verify(plaintext: &str) {
    let hash = DUMMY_HASH.get_or_init(|| {
        PasswordHash::from_plaintext("placeholder-for-unknown-users")
            .unwrap_or_else(|err| panic!("dummy hash must be constructible: {err}"))
    });
    let _ = hash.verify(plaintext);
}
