#![allow(dead_code)]

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use warehouse_api::{
    migrator::Migrator,
    services::{documents::DocumentLineInput, AppServices},
};

/// Fresh in-memory database with the full schema applied. A single
/// connection keeps every query on the same sqlite memory instance.
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.expect("sqlite connect");
    Migrator::up(&db, None).await.expect("migrations");
    Arc::new(db)
}

pub async fn services() -> AppServices {
    AppServices::new(setup_db().await)
}

pub fn line(resource_id: i64, unit_id: i64, count: rust_decimal::Decimal) -> DocumentLineInput {
    DocumentLineInput {
        resource_id,
        unit_id,
        count,
    }
}
