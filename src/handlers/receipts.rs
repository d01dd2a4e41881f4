use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    dto::ApiResponse,
    errors::ServiceError,
    handlers::DocumentQuery,
    messages,
    services::documents::DocumentLineInput,
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    #[serde(default)]
    pub lines: Vec<DocumentLineInput>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = query.into_filter()?;
    let docs = state.services.receipts.list(&filter).await?;
    Ok(Json(docs))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ReceiptPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.receipts.create(&payload.lines).await?;
    Ok(ApiResponse::with_data(
        StatusCode::CREATED,
        messages::RECEIPT_CREATED,
        created,
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReceiptPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.receipts.update(id, &payload.lines).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        messages::RECEIPT_UPDATED,
        updated,
    ))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.receipts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
