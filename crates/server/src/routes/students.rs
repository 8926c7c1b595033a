use axum::{extract::State, http::StatusCode, Form, Json};
use tracing::info;

use service::mutations::student::{self, StudentInput};

use crate::errors::JsonApiError;
use crate::routes::{require_id, DeleteForm, ServerState};

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error (e.g. class full)"),
        (status = 502, description = "Identity Provider Failed"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<StudentInput>,
) -> Result<Json<models::student::Model>, JsonApiError> {
    match student::create_student(&state.ctx, input).await {
        Ok(m) => {
            info!(id = %m.id, class_id = m.class_id, "created student");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/students", tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Identity Provider Failed"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Json(input): Json<StudentInput>,
) -> Result<Json<models::student::Model>, JsonApiError> {
    match student::update_student(&state.ctx, input).await {
        Ok(m) => {
            info!(id = %m.id, "updated student");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/students", tag = "students",
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Identity Provider Failed"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Form(form): Form<DeleteForm>,
) -> Result<StatusCode, JsonApiError> {
    let id = require_id(form)?;
    match student::delete_student(&state.ctx, &id).await {
        Ok(()) => {
            info!(id = %id, "deleted student");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
