//! Warehouse API Library
//!
//! REST API for a warehouse: catalogs of resources, units of measure and
//! clients; a stock balance ledger; receipt documents that bring goods in
//! and shipment documents that take goods out once signed.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod migrator;
pub mod services;

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::config::AppConfig;
use crate::services::AppServices;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: AppConfig) -> Self {
        let services = AppServices::new(db.clone());
        Self {
            db,
            config: Arc::new(config),
            services,
        }
    }
}

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/resources", handlers::resources::routes())
        .nest("/units", handlers::units::routes())
        .nest("/clients", handlers::clients::routes())
        .nest("/storage", handlers::balances::routes())
        .nest("/receipts", handlers::receipts::routes())
        .nest("/shipments", handlers::shipments::routes())
}

/// The complete application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = db::check_connection(&state.db).await;
    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(json!({
            "status": if db_ok { "ok" } else { "degraded" },
            "database": db_ok,
        })),
    )
}
