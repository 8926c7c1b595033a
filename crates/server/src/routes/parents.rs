use axum::{extract::State, http::StatusCode, Form, Json};
use tracing::info;

use service::mutations::parent::{self, ParentInput};

use crate::errors::JsonApiError;
use crate::routes::{require_id, DeleteForm, ServerState};

#[utoipa::path(
    post, path = "/parents", tag = "parents",
    request_body = crate::openapi::ParentInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 502, description = "Identity Provider Failed"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ParentInput>,
) -> Result<Json<models::parent::Model>, JsonApiError> {
    match parent::create_parent(&state.ctx, input).await {
        Ok(m) => {
            info!(id = %m.id, username = %m.username, "created parent");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/parents", tag = "parents",
    request_body = crate::openapi::ParentInputDoc,
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
    Json(input): Json<ParentInput>,
) -> Result<Json<models::parent::Model>, JsonApiError> {
    match parent::update_parent(&state.ctx, input).await {
        Ok(m) => {
            info!(id = %m.id, "updated parent");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/parents", tag = "parents",
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
    match parent::delete_parent(&state.ctx, &id).await {
        Ok(()) => {
            info!(id = %id, "deleted parent");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
