use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::{errors::ServiceError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceQuery {
    pub resource_id: Option<i64>,
    pub unit_id: Option<i64>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/balance", get(list))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<BalanceQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let rows = state
        .services
        .balances
        .list(query.resource_id, query.unit_id)
        .await?;
    Ok(Json(rows))
}
