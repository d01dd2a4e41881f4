//! Response envelope and read models returned by the HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entities::shipment_document::DocumentState;

/// Envelope for mutation responses: `{ statusCode, message, data? }`,
/// mirrored into the HTTP status code. List endpoints return bare arrays
/// instead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_data(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// A balance row joined with catalog names for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockBalance {
    pub id: i64,
    pub resource_id: i64,
    pub resource_name: String,
    pub unit_id: i64,
    pub unit_name: String,
    pub count: Decimal,
}

/// A document line joined with catalog names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLineView {
    pub id: i64,
    pub resource_id: i64,
    pub resource_name: String,
    pub unit_id: i64,
    pub unit_name: String,
    pub count: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDocumentView {
    pub id: i64,
    pub number: i64,
    pub date: DateTime<Utc>,
    pub lines: Vec<DocumentLineView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDocumentView {
    pub id: i64,
    pub number: i64,
    pub client_id: i64,
    pub client_name: String,
    pub date: DateTime<Utc>,
    pub state: DocumentState,
    pub lines: Vec<DocumentLineView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_camel_case() {
        let body = ApiResponse::with_data(StatusCode::CREATED, "Resource created", 7);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["message"], "Resource created");
        assert_eq!(json["data"], 7);
    }

    #[test]
    fn envelope_omits_missing_data() {
        let body = ApiResponse::message(StatusCode::NOT_FOUND, "Resource not found");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("data").is_none());
    }
}
