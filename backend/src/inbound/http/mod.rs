//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod notes;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::{web, Scope};

use self::state::HttpState;

/// Assemble the `/api/v1` scope over the given service state.
///
/// Shared between the server bootstrap and in-process tests so both run
/// the same routing table.
pub fn api_scope(state: HttpState) -> Scope {
    web::scope("/api/v1")
        .app_data(web::Data::new(state))
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::view_profile)
        .service(users::delete_account)
        .service(notes::add_note)
        .service(notes::update_note)
}
