//! Account API handlers.
//!
//! ```text
//! POST   /api/v1/register          {"username","password","email","firstName","lastName"}
//! POST   /api/v1/login             {"username","password"}
//! POST   /api/v1/logout
//! GET    /api/v1/users/{username}
//! DELETE /api/v1/users/{username}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, ProfileView, Registration,
    RegistrationValidationError, User, UserValidationError, Username,
};
use crate::inbound::http::notes::NoteResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.username,
            &value.password,
            &value.email,
            &value.first_name,
            &value.last_name,
        )
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Account fields safe to return to the owner. Never carries the hash.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            email: user.email().to_string(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
        }
    }
}

/// Profile payload: the account plus the notes it owns.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub notes: Vec<NoteResponse>,
}

impl From<&ProfileView> for ProfileResponse {
    fn from(view: &ProfileView) -> Self {
        Self {
            user: UserResponse::from(&view.user),
            notes: view.notes.iter().map(NoteResponse::from).collect(),
        }
    }
}

/// Register a new account and establish a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; session cookie set", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_error)?;
    let user = state.accounts.register(&registration).await?;
    session.establish(user.username())?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success; session cookie set", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.accounts.authenticate(&credentials).await?;
    session.establish(user.username())?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Drop the session identity. Safe to call without one.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// View an account profile and its notes. Owner only.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}",
    params(("username" = String, Path, description = "Account to view")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "viewProfile"
)]
#[get("/users/{username}")]
pub async fn view_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let username = parse_path_username(&path)?;
    let identity = session.identity()?;
    let view = state.accounts.profile(&identity, &username).await?;
    Ok(web::Json(ProfileResponse::from(&view)))
}

/// Delete an account, cascade to its notes, and clear the session.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{username}",
    params(("username" = String, Path, description = "Account to delete")),
    responses(
        (status = 204, description = "Account and notes removed; session cleared"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount"
)]
#[delete("/users/{username}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let username = parse_path_username(&path)?;
    let identity = session.identity()?;
    state.accounts.delete_account(&identity, &username).await?;
    // The authenticated identity no longer exists.
    session.clear();
    Ok(HttpResponse::NoContent().finish())
}

fn parse_path_username(raw: &str) -> Result<Username, Error> {
    Username::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "username", "code": "invalid_username" }))
    })
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_registration_error(err: RegistrationValidationError) -> Error {
    let (field, code) = match &err {
        RegistrationValidationError::EmptyPassword => ("password", "empty_password"),
        RegistrationValidationError::User(user_err) => match user_err {
            UserValidationError::EmptyUsername => ("username", "empty_username"),
            UserValidationError::UsernameTooLong { .. } => ("username", "username_too_long"),
            UserValidationError::UsernameInvalidCharacters => {
                ("username", "username_invalid_characters")
            }
            UserValidationError::InvalidEmail => ("email", "invalid_email"),
            UserValidationError::EmptyFirstName => ("firstName", "empty_first_name"),
            UserValidationError::EmptyLastName => ("lastName", "empty_last_name"),
        },
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{register_payload, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    async fn register_user(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        username: &str,
        password: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(register_payload(username, password))
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn register_returns_profile_fields_without_hash() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(register_payload("alice", "pw1"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["username"], "alice");
        assert_eq!(value["firstName"], "A");
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn duplicate_username_registration_conflicts() {
        let app = actix_test::init_service(test_app()).await;
        register_user(&app, "alice", "pw1").await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(register_payload("alice", "pw2"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["code"], "username_taken");
    }

    #[rstest]
    #[case("", "pw", "username", "empty_username")]
    #[case("alice", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_malformed_payloads(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn login_failures_are_generic_for_both_causes() {
        let app = actix_test::init_service(test_app()).await;
        register_user(&app, "alice", "pw1").await;

        let mut bodies = Vec::new();
        for (username, password) in [("alice", "wrong"), ("nobody", "wrong")] {
            let request = actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: username.into(),
                    password: password.into(),
                })
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(actix_test::read_body(response).await);
        }
        assert_eq!(bodies[0], bodies[1], "unknown user must not be detectable");
    }

    #[actix_web::test]
    async fn profile_is_owner_only() {
        let app = actix_test::init_service(test_app()).await;
        let alice_cookie = register_user(&app, "alice", "pw1").await;
        register_user(&app, "bob", "pw2").await;

        // Anonymous: 401 not_authenticated.
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/alice")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["code"], "not_authenticated");

        // Wrong account: 403 forbidden, a distinct failure mode.
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/bob")
                .cookie(alice_cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Owner: 200 with the profile payload.
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/alice")
                .cookie(alice_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["username"], "alice");
        assert_eq!(value["notes"], serde_json::json!([]));
    }

    #[actix_web::test]
    async fn logout_is_idempotent() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/logout")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn delete_account_requires_ownership_and_clears_session() {
        let app = actix_test::init_service(test_app()).await;
        let alice_cookie = register_user(&app, "alice", "pw1").await;
        let bob_cookie = register_user(&app, "bob", "pw2").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/users/alice")
                .cookie(bob_cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/users/alice")
                .cookie(alice_cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // The account is gone; its old password no longer authenticates.
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(LoginRequest {
                    username: "alice".into(),
                    password: "pw1".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
