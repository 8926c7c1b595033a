use axum::{extract::State, http::StatusCode, Form, Json};
use tracing::info;

use service::mutations::class::{self, ClassInput};

use crate::errors::JsonApiError;
use crate::routes::{parse_int_id, DeleteForm, ServerState};

#[utoipa::path(
    post, path = "/classes", tag = "classes",
    request_body = crate::openapi::ClassInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ClassInput>,
) -> Result<Json<models::class::Model>, JsonApiError> {
    match class::create_class(&state.ctx, input).await {
        Ok(m) => {
            info!(id = m.id, name = %m.name, "created class");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/classes", tag = "classes",
    request_body = crate::openapi::ClassInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Json(input): Json<ClassInput>,
) -> Result<Json<models::class::Model>, JsonApiError> {
    match class::update_class(&state.ctx, input).await {
        Ok(m) => {
            info!(id = m.id, "updated class");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/classes", tag = "classes",
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
    match class::delete_class(&state.ctx, id).await {
        Ok(()) => {
            info!(id, "deleted class");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
