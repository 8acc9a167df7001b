//! Note API handlers.
//!
//! ```text
//! POST  /api/v1/users/{username}/notes  {"title","content"}
//! PATCH /api/v1/notes/{id}              {"title"?,"content"?}
//! ```
//!
//! Patch fields that are omitted or submitted empty keep the stored
//! value, so title and content can be changed independently.

use actix_web::{patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Note, NoteDraft, NoteId, NotePatch, NoteTitle, NoteValidationError};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation request body for `POST /api/v1/users/{username}/notes`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,
    /// Body text; may be empty.
    #[serde(default)]
    pub content: String,
}

impl TryFrom<CreateNoteRequest> for NoteDraft {
    type Error = NoteValidationError;

    fn try_from(value: CreateNoteRequest) -> Result<Self, Self::Error> {
        let title = NoteTitle::new(value.title)?;
        Ok(Self::new(title, value.content))
    }
}

/// Update request body for `PATCH /api/v1/notes/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    /// Replacement title; omitted or empty keeps the stored title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement content; omitted or empty keeps the stored content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl TryFrom<UpdateNoteRequest> for NotePatch {
    type Error = NoteValidationError;

    fn try_from(value: UpdateNoteRequest) -> Result<Self, Self::Error> {
        let title = match value.title {
            Some(raw) if !raw.trim().is_empty() => Some(NoteTitle::new(raw)?),
            _ => None,
        };
        let content = value.content.filter(|raw| !raw.is_empty());
        Ok(Self::new(title, content))
    }
}

/// Note payload returned by note and profile endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub owner: String,
}

impl From<&Note> for NoteResponse {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().get(),
            title: note.title().to_string(),
            content: note.content().to_owned(),
            owner: note.owner().to_string(),
        }
    }
}

/// Create a note in the caller's own collection.
#[utoipa::path(
    post,
    path = "/api/v1/users/{username}/notes",
    params(("username" = String, Path, description = "Collection owner")),
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Owner account not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/users/{username}/notes")]
pub async fn add_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let owner = crate::domain::Username::new(path.as_str()).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "username", "code": "invalid_username" }))
    })?;
    let draft = NoteDraft::try_from(payload.into_inner()).map_err(map_note_validation_error)?;
    let identity = session.identity()?;
    let note = state.notes.add_note(&identity, &owner, &draft).await?;
    Ok(HttpResponse::Created().json(NoteResponse::from(&note)))
}

/// Update a note's title and/or content. Ownership is decided by the
/// stored note, never by the request path.
#[utoipa::path(
    patch,
    path = "/api/v1/notes/{id}",
    params(("id" = i64, Path, description = "Note identifier")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Updated note", body = NoteResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Note not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notes"],
    operation_id = "updateNote"
)]
#[patch("/notes/{id}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<UpdateNoteRequest>,
) -> ApiResult<web::Json<NoteResponse>> {
    let id = NoteId::new(path.into_inner());
    let patch = NotePatch::try_from(payload.into_inner()).map_err(map_note_validation_error)?;
    let identity = session.identity()?;
    let note = state.notes.update_note(&identity, id, &patch).await?;
    Ok(web::Json(NoteResponse::from(&note)))
}

fn map_note_validation_error(err: NoteValidationError) -> Error {
    let code = match &err {
        NoteValidationError::EmptyTitle => "empty_title",
        NoteValidationError::TitleTooLong { .. } => "title_too_long",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": "title", "code": code }))
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
    ) -> actix_web::cookie::Cookie<'static> {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(register_payload(username, "pw1"))
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
    async fn owner_creates_a_note_with_empty_content() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = register_user(&app, "alice").await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/alice/notes")
            .cookie(cookie)
            .set_json(CreateNoteRequest {
                title: "T".into(),
                content: String::new(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "T");
        assert_eq!(value["content"], "");
        assert_eq!(value["owner"], "alice");
    }

    #[actix_web::test]
    async fn add_note_rejects_other_collections() {
        let app = actix_test::init_service(test_app()).await;
        register_user(&app, "alice").await;
        let bob_cookie = register_user(&app, "bob").await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/alice/notes")
            .cookie(bob_cookie)
            .set_json(CreateNoteRequest {
                title: "T".into(),
                content: String::new(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn add_note_requires_a_title() {
        let app = actix_test::init_service(test_app()).await;
        let cookie = register_user(&app, "alice").await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/alice/notes")
            .cookie(cookie)
            .set_json(CreateNoteRequest {
                title: "   ".into(),
                content: "body".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value["details"]["code"], "empty_title");
    }

    #[rstest]
    // Empty strings mean "keep the stored value", per field.
    #[case(json!({ "title": "", "content": "C" }), "T", "C")]
    #[case(json!({ "content": "C" }), "T", "C")]
    #[case(json!({ "title": "V" }), "V", "original")]
    #[case(json!({ "title": "V", "content": "" }), "V", "original")]
    #[case(json!({}), "T", "original")]
    #[actix_web::test]
    async fn update_keeps_absent_or_empty_fields(
        #[case] patch: Value,
        #[case] expected_title: &str,
        #[case] expected_content: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let cookie = register_user(&app, "alice").await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/alice/notes")
            .cookie(cookie.clone())
            .set_json(CreateNoteRequest {
                title: "T".into(),
                content: "original".into(),
            })
            .to_request();
        let created = actix_test::call_service(&app, request).await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let request = actix_test::TestRequest::patch()
            .uri("/api/v1/notes/1")
            .cookie(cookie)
            .set_json(patch)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["title"], expected_title);
        assert_eq!(value["content"], expected_content);
    }

    #[actix_web::test]
    async fn update_rejects_unknown_ids_and_foreign_notes() {
        let app = actix_test::init_service(test_app()).await;
        let alice_cookie = register_user(&app, "alice").await;
        let bob_cookie = register_user(&app, "bob").await;

        let request = actix_test::TestRequest::patch()
            .uri("/api/v1/notes/42")
            .cookie(alice_cookie.clone())
            .set_json(UpdateNoteRequest::default())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/users/alice/notes")
            .cookie(alice_cookie)
            .set_json(CreateNoteRequest {
                title: "T".into(),
                content: String::new(),
            })
            .to_request();
        let created = actix_test::call_service(&app, request).await;
        assert_eq!(created.status(), StatusCode::CREATED);

        // The path names the note, not the owner: bob is rejected by the
        // stored note's ownership even though nothing in the URL says alice.
        let request = actix_test::TestRequest::patch()
            .uri("/api/v1/notes/1")
            .cookie(bob_cookie)
            .set_json(UpdateNoteRequest {
                title: Some("stolen".into()),
                content: None,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
