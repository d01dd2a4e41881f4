use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    dto::ApiResponse,
    errors::ServiceError,
    handlers::{BulkIds, CatalogQuery},
    messages::{self, CatalogKind},
    AppState,
};

const KIND: CatalogKind = CatalogKind::Client;

/// Clients carry an address on top of the common catalog fields.
#[derive(Debug, Deserialize, Validate)]
pub struct ClientPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub address: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(remove))
        .route("/:id/archive", post(archive))
        .route("/archive", post(bulk_archive))
        .route("/delete", post(bulk_delete))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.services.clients.list(query.state).await?;
    Ok(Json(items))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let created = state
        .services
        .clients
        .create(&payload.name, &payload.address)
        .await?;
    Ok(ApiResponse::with_data(
        StatusCode::CREATED,
        KIND.created(),
        created,
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let updated = state
        .services
        .clients
        .update(id, &payload.name, &payload.address)
        .await?;
    Ok(ApiResponse::with_data(StatusCode::OK, KIND.updated(), updated))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.clients.delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, KIND.deleted()))
}

async fn archive(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let archived = state.services.clients.archive(id).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        KIND.archived(),
        archived,
    ))
}

async fn bulk_archive(
    State(state): State<AppState>,
    Json(payload): Json<BulkIds>,
) -> impl IntoResponse {
    let outcome = state.services.clients.bulk_archive(&payload.ids).await;
    ApiResponse::with_data(outcome.status(), messages::BULK_ARCHIVE_DONE, outcome)
}

async fn bulk_delete(
    State(state): State<AppState>,
    Json(payload): Json<BulkIds>,
) -> impl IntoResponse {
    let outcome = state.services.clients.bulk_delete(&payload.ids).await;
    ApiResponse::with_data(outcome.status(), messages::BULK_DELETE_DONE, outcome)
}
