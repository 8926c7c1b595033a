use axum::{extract::State, http::StatusCode, Form, Json};
use tracing::info;

use service::mutations::subject::{self, SubjectInput};

use crate::errors::JsonApiError;
use crate::routes::{parse_int_id, DeleteForm, ServerState};

#[utoipa::path(
    post, path = "/subjects", tag = "subjects",
    request_body = crate::openapi::SubjectInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<SubjectInput>,
) -> Result<Json<models::subject::Model>, JsonApiError> {
    match subject::create_subject(&state.ctx, input).await {
        Ok(m) => {
            info!(id = m.id, name = %m.name, "created subject");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/subjects", tag = "subjects",
    request_body = crate::openapi::SubjectInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Json(input): Json<SubjectInput>,
) -> Result<Json<models::subject::Model>, JsonApiError> {
    match subject::update_subject(&state.ctx, input).await {
        Ok(m) => {
            info!(id = m.id, "updated subject");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/subjects", tag = "subjects",
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Missing or invalid id"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Form(form): Form<DeleteForm>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_int_id(form)?;
    match subject::delete_subject(&state.ctx, id).await {
        Ok(()) => {
            info!(id, "deleted subject");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
