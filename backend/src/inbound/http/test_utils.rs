//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;
use actix_web::App;

use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::RegisterRequest;
use crate::outbound::persistence::{MemoryNoteRepository, MemoryUserRepository};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build the full API app over fresh in-memory stores.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryNoteRepository::new()),
    );
    App::new()
        .wrap(test_session_middleware())
        .service(crate::inbound::http::api_scope(state))
}

/// Registration body with fixed profile fields.
pub fn register_payload(username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_owned(),
        password: password.to_owned(),
        email: format!("{username}@example.com"),
        first_name: "A".to_owned(),
        last_name: "L".to_owned(),
    }
}
