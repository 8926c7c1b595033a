use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use common::types::Health;
use service::context::MutationContext;

use crate::errors::JsonApiError;

pub mod attendance;
pub mod classes;
pub mod exams;
pub mod parents;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub ctx: MutationContext,
    pub auth: ServerAuthConfig,
}

/// Delete endpoints consume a form-encoded body carrying a single `id` field.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: Option<String>,
}

pub(crate) fn require_id(form: DeleteForm) -> Result<String, JsonApiError> {
    match form.id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(JsonApiError::bad_request("id required")),
    }
}

pub(crate) fn parse_int_id(form: DeleteForm) -> Result<i32, JsonApiError> {
    let raw = require_id(form)?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| JsonApiError::bad_request(format!("invalid id '{}'", raw)))
}

pub(crate) fn parse_uuid_id(form: DeleteForm) -> Result<Uuid, JsonApiError> {
    let raw = require_id(form)?;
    Uuid::parse_str(raw.trim()).map_err(|_| JsonApiError::bad_request(format!("invalid id '{}'", raw)))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, per-entity mutation routes,
/// and the OpenAPI docs mount.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route(
            "/subjects",
            post(subjects::create).put(subjects::update).delete(subjects::delete),
        )
        .route(
            "/classes",
            post(classes::create).put(classes::update).delete(classes::delete),
        )
        .route(
            "/teachers",
            post(teachers::create).put(teachers::update).delete(teachers::delete),
        )
        .route(
            "/students",
            post(students::create).put(students::update).delete(students::delete),
        )
        .route(
            "/parents",
            post(parents::create).put(parents::update).delete(parents::delete),
        )
        .route(
            "/exams",
            post(exams::create).put(exams::update).delete(exams::delete),
        )
        .route("/results", post(results::create).delete(results::delete))
        .route("/results/:id", put(results::update))
        .route("/attendance", post(attendance::create).delete(attendance::delete))
        .route("/attendance/:id", put(attendance::update));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
