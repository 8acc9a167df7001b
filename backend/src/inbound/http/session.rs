//! Session helpers keeping HTTP handlers free of framework specifics.
//!
//! A thin wrapper around the actix cookie session exposing exactly the
//! three operations the core needs: bind a username after login or
//! registration, read the current identity, and clear the binding on
//! logout or self-deletion. Handlers receive the wrapper by extraction
//! and hand the domain a plain [`Identity`] value.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Identity, Username};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype wrapper exposing identity-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind the authenticated username to this connection.
    pub fn establish(&self, username: &Username) -> Result<(), Error> {
        self.0
            .insert(USERNAME_KEY, username.as_ref())
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// Identity currently bound to this connection.
    ///
    /// A stored value that no longer parses as a username is treated as
    /// anonymous rather than an error; the cookie is signed, so this only
    /// happens across validation-rule changes.
    pub fn identity(&self) -> Result<Identity, Error> {
        let raw = self
            .0
            .get::<String>(USERNAME_KEY)
            .map_err(|err| Error::internal(format!("failed to read session: {err}")))?;
        match raw {
            Some(value) => match Username::new(value) {
                Ok(username) => Ok(Identity::Authenticated(username)),
                Err(err) => {
                    tracing::warn!("invalid username in session cookie: {err}");
                    Ok(Identity::Anonymous)
                }
            },
            None => Ok(Identity::Anonymous),
        }
    }

    /// Remove the binding and invalidate the session. Idempotent.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
