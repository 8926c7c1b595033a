use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use tracing::info;
use uuid::Uuid;

use service::mutations::result::{self, ResultEntry, UpdateResultInput};

use crate::errors::JsonApiError;
use crate::routes::{parse_uuid_id, DeleteForm, ServerState};

#[utoipa::path(
    post, path = "/results", tag = "results",
    request_body = Vec<crate::openapi::ResultEntryDoc>,
    responses(
        (status = 200, description = "All rows created"),
        (status = 400, description = "Empty batch or invalid subject ids"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(entries): Json<Vec<ResultEntry>>,
) -> Result<Json<Vec<models::result::Model>>, JsonApiError> {
    match result::create_results(&state.ctx, entries).await {
        Ok(rows) => {
            info!(rows = rows.len(), "created results");
            Ok(Json(rows))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/results/{id}", tag = "results",
    params(("id" = Uuid, Path, description = "Result ID")),
    request_body = crate::openapi::UpdateResultInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateResultInput>,
) -> Result<Json<models::result::Model>, JsonApiError> {
    match result::update_result(&state.ctx, id, input).await {
        Ok(m) => {
            info!(id = %m.id, "updated result");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/results", tag = "results",
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
    let id = parse_uuid_id(form)?;
    match result::delete_result(&state.ctx, id).await {
        Ok(()) => {
            info!(id = %id, "deleted result");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
