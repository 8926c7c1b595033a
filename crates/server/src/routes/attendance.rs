use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use tracing::info;

use service::mutations::attendance::{self, AttendanceInput};

use crate::errors::JsonApiError;
use crate::routes::{parse_int_id, DeleteForm, ServerState};

#[utoipa::path(
    post, path = "/attendance", tag = "attendance",
    request_body = crate::openapi::AttendanceInputDoc,
    responses(
        (status = 200, description = "Created"),
        (status = 400, description = "Invalid date"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<AttendanceInput>,
) -> Result<Json<models::attendance::Model>, JsonApiError> {
    match attendance::create_attendance(&state.ctx, input).await {
        Ok(m) => {
            info!(id = m.id, class_name = %m.class_name, "created attendance");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/attendance/{id}", tag = "attendance",
    params(("id" = i32, Path, description = "Attendance ID")),
    request_body = crate::openapi::AttendanceInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid date"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<AttendanceInput>,
) -> Result<Json<models::attendance::Model>, JsonApiError> {
    match attendance::update_attendance(&state.ctx, id, input).await {
        Ok(m) => {
            info!(id = m.id, "updated attendance");
            Ok(Json(m))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/attendance", tag = "attendance",
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
    match attendance::delete_attendance(&state.ctx, id).await {
        Ok(()) => {
            info!(id, "deleted attendance");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(JsonApiError::from_service(e, "Delete Failed")),
    }
}
