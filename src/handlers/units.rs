use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use validator::Validate;

use crate::{
    dto::ApiResponse,
    errors::ServiceError,
    handlers::{BulkIds, CatalogQuery, NamePayload},
    messages::{self, CatalogKind},
    AppState,
};

const KIND: CatalogKind = CatalogKind::Unit;

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
    let items = state.services.units.list(query.state).await?;
    Ok(Json(items))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NamePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let created = state.services.units.create(&payload.name).await?;
    Ok(ApiResponse::with_data(
        StatusCode::CREATED,
        KIND.created(),
        created,
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NamePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    payload.validate()?;
    let updated = state.services.units.update(id, &payload.name).await?;
    Ok(ApiResponse::with_data(StatusCode::OK, KIND.updated(), updated))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.units.delete(id).await?;
    Ok(ApiResponse::message(StatusCode::OK, KIND.deleted()))
}

async fn archive(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let archived = state.services.units.archive(id).await?;
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
    let outcome = state.services.units.bulk_archive(&payload.ids).await;
    ApiResponse::with_data(outcome.status(), messages::BULK_ARCHIVE_DONE, outcome)
}

async fn bulk_delete(
    State(state): State<AppState>,
    Json(payload): Json<BulkIds>,
) -> impl IntoResponse {
    let outcome = state.services.units.bulk_delete(&payload.ids).await;
    ApiResponse::with_data(outcome.status(), messages::BULK_DELETE_DONE, outcome)
}
