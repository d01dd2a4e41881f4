use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
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
pub struct ShipmentPayload {
    pub client_id: i64,
    #[serde(default)]
    pub lines: Vec<DocumentLineInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentUpdatePayload {
    #[serde(default)]
    pub lines: Vec<DocumentLineInput>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(remove))
        .route("/sign/:id", patch(sign))
        .route("/withdraw/:id", patch(withdraw))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<DocumentQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let filter = query.into_filter()?;
    let docs = state.services.shipments.list(&filter).await?;
    Ok(Json(docs))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ShipmentPayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state
        .services
        .shipments
        .create(payload.client_id, &payload.lines)
        .await?;
    Ok(ApiResponse::with_data(
        StatusCode::CREATED,
        messages::SHIPMENT_CREATED,
        created,
    ))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShipmentUpdatePayload>,
) -> Result<impl IntoResponse, ServiceError> {
    let updated = state.services.shipments.update(id, &payload.lines).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        messages::SHIPMENT_UPDATED,
        updated,
    ))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.shipments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn sign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let signed = state.services.shipments.sign(id).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        messages::SHIPMENT_SIGNED,
        signed,
    ))
}

async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServiceError> {
    let withdrawn = state.services.shipments.withdraw(id).await?;
    Ok(ApiResponse::with_data(
        StatusCode::OK,
        messages::SHIPMENT_WITHDRAWN,
        withdrawn,
    ))
}
