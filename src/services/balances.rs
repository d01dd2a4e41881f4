//! Balance ledger access.
//!
//! `credit` and `debit` are the only mutation paths; they run on the
//! caller's transaction connection so every document operation stays
//! all-or-nothing. `debit` pre-checks sufficiency before writing anything,
//! which keeps the non-negative invariant intact on any failure path.
//! Callers must open that transaction serializable (see
//! `documents::begin_serializable`) or the pre-check can race.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, Set,
};
use tracing::instrument;

use crate::{
    dto::StockBalance,
    entities::{balance, resource, unit},
    errors::ServiceError,
    messages,
};

/// Read-side access to the balance ledger.
#[derive(Clone)]
pub struct BalanceService {
    db: Arc<DatabaseConnection>,
}

impl BalanceService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists balance rows, optionally filtered by resource and/or unit,
    /// joined with catalog names for display.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        resource_id: Option<i64>,
        unit_id: Option<i64>,
    ) -> Result<Vec<StockBalance>, ServiceError> {
        let db = &*self.db;
        let mut query = balance::Entity::find();
        if let Some(resource_id) = resource_id {
            query = query.filter(balance::Column::ResourceId.eq(resource_id));
        }
        if let Some(unit_id) = unit_id {
            query = query.filter(balance::Column::UnitId.eq(unit_id));
        }
        let rows = query.all(db).await?;

        let resource_names = name_index::<resource::Entity>(db).await?;
        let unit_names = name_index::<unit::Entity>(db).await?;

        Ok(rows
            .into_iter()
            .map(|row| StockBalance {
                id: row.id,
                resource_name: resource_names
                    .get(&row.resource_id)
                    .cloned()
                    .unwrap_or_default(),
                unit_name: unit_names.get(&row.unit_id).cloned().unwrap_or_default(),
                resource_id: row.resource_id,
                unit_id: row.unit_id,
                count: row.count,
            })
            .collect())
    }
}

async fn name_index<E>(db: &DatabaseConnection) -> Result<HashMap<i64, String>, ServiceError>
where
    E: crate::entities::CatalogEntity,
{
    let models = E::find().all(db).await?;
    Ok(models
        .into_iter()
        .map(|m| (E::id_of(&m), E::name_of(&m).to_string()))
        .collect())
}

pub(crate) async fn balance_row<C>(
    conn: &C,
    resource_id: i64,
    unit_id: i64,
) -> Result<Option<balance::Model>, ServiceError>
where
    C: ConnectionTrait,
{
    balance::Entity::find()
        .filter(balance::Column::ResourceId.eq(resource_id))
        .filter(balance::Column::UnitId.eq(unit_id))
        .one(conn)
        .await
        .map_err(ServiceError::from)
}

/// Adds `amount` to the (resource, unit) balance, creating the row lazily.
pub(crate) async fn credit<C>(
    conn: &C,
    resource_id: i64,
    unit_id: i64,
    amount: Decimal,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    match balance_row(conn, resource_id, unit_id).await? {
        Some(row) => {
            let count = row.count + amount;
            let mut active = row.into_active_model();
            active.count = Set(count);
            active.update(conn).await?;
        }
        None => {
            balance::ActiveModel {
                resource_id: Set(resource_id),
                unit_id: Set(unit_id),
                count: Set(amount),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
    }
    Ok(())
}

/// Subtracts `amount` from the (resource, unit) balance. Fails before any
/// write when the row is missing or holds less than `amount`.
pub(crate) async fn debit<C>(
    conn: &C,
    resource_id: i64,
    unit_id: i64,
    amount: Decimal,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let row = match balance_row(conn, resource_id, unit_id).await? {
        Some(row) if row.count >= amount => row,
        _ => {
            return Err(ServiceError::InsufficientStock(
                messages::NOT_ENOUGH_RESOURCE.to_string(),
            ))
        }
    };
    let count = row.count - amount;
    let mut active = row.into_active_model();
    active.count = Set(count);
    active.update(conn).await?;
    Ok(())
}
