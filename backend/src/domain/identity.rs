//! Session identity and the ownership authorization policy.
//!
//! The session layer produces an [`Identity`] value and threads it into
//! every protected service call, keeping the policy pure and testable
//! without a simulated request environment. Every ownership decision in
//! the service layer goes through [`authorize_owner`] so the two failure
//! modes — no session at all versus the wrong account — stay distinct
//! and are never re-derived ad hoc per handler.

use crate::domain::error::Error;
use crate::domain::user::Username;

/// Identity bound to the current connection, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// No login has happened on this connection.
    Anonymous,
    /// A login or registration bound this username to the connection.
    Authenticated(Username),
}

impl Identity {
    /// The bound username, if authenticated.
    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(username) => Some(username),
        }
    }

    /// Require an authenticated caller or fail with `NotAuthenticated`.
    pub fn require(&self) -> Result<&Username, Error> {
        self.username()
            .ok_or_else(|| Error::not_authenticated("login required"))
    }
}

/// The single ownership rule: a caller may act on a resource only when
/// the session identity equals the resource's owning identity.
///
/// # Examples
/// ```
/// use backend::domain::{authorize_owner, Identity, Username};
///
/// let alice = Username::new("alice").unwrap();
/// let identity = Identity::Authenticated(alice.clone());
/// assert!(authorize_owner(&identity, &alice).is_ok());
/// ```
pub fn authorize_owner(identity: &Identity, owner: &Username) -> Result<(), Error> {
    let caller = identity.require()?;
    if caller == owner {
        Ok(())
    } else {
        Err(Error::forbidden(format!(
            "not permitted to act on {owner}'s resources"
        )))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn alice() -> Username {
        Username::new("alice").expect("valid username")
    }

    fn bob() -> Username {
        Username::new("bob").expect("valid username")
    }

    #[rstest]
    fn anonymous_caller_is_not_authenticated() {
        let err = authorize_owner(&Identity::Anonymous, &alice()).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::NotAuthenticated);
    }

    #[rstest]
    fn wrong_account_is_forbidden_not_unauthenticated() {
        let identity = Identity::Authenticated(alice());
        let err = authorize_owner(&identity, &bob()).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn owner_is_permitted() {
        let identity = Identity::Authenticated(alice());
        assert!(authorize_owner(&identity, &alice()).is_ok());
    }

    #[rstest]
    fn require_exposes_the_bound_username() {
        let identity = Identity::Authenticated(alice());
        assert_eq!(identity.require().expect("authenticated"), &alice());
        assert!(Identity::Anonymous.require().is_err());
    }
}
