use axum::{extract::State, http::StatusCode, Form, Json};
use tracing::info;

use service::mutations::exam::{self, ExamInput};

use crate::errors::JsonApiError;
use crate::routes::{parse_int_id, DeleteForm, ServerState};
use crate::session::CallerSession;

#[utoipa::path(
    post, path = "/exams", tag = "exams",
    request_body = crate::openapi::ExamInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 403, description = "Lesson not owned by caller"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    CallerSession(session): CallerSession,
    Json(input): Json<ExamInput>,
) -> Result<Json<models::exam::Model>, JsonApiError> {
    match exam::create_exam(&state.ctx, &session, input).await {
        Ok(m) => {
            info!(id = m.id, lesson_id = m.lesson_id, "created exam");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/exams", tag = "exams",
    request_body = crate::openapi::ExamInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 403, description = "Lesson not owned by caller"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    CallerSession(session): CallerSession,
    Json(input): Json<ExamInput>,
) -> Result<Json<models::exam::Model>, JsonApiError> {
    match exam::update_exam(&state.ctx, &session, input).await {
        Ok(m) => {
            info!(id = m.id, "updated exam");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/exams", tag = "exams",
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Missing or invalid id"),
        (status = 403, description = "Restricted by policy"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    CallerSession(session): CallerSession,
    Form(form): Form<DeleteForm>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_int_id(form)?;
    match exam::delete_exam(&state.ctx, &session, id).await {
        Ok(()) => {
            info!(id, "deleted exam");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
