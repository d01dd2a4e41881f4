use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use tracing::{info, instrument};

use crate::{
    entities::{receipt_line, shipment_line, unit, EntityState},
    errors::ServiceError,
    messages::CatalogKind,
    services::catalog::{self, BulkOutcome},
};

/// Catalog service for units of measure.
#[derive(Clone)]
pub struct UnitService {
    db: Arc<DatabaseConnection>,
}

impl UnitService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, state: Option<EntityState>) -> Result<Vec<unit::Model>, ServiceError> {
        catalog::list_entities::<unit::Entity, _>(&*self.db, state).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<unit::Model, ServiceError> {
        let db = &*self.db;
        let name = catalog::normalized_name(CatalogKind::Unit, name)?;
        catalog::ensure_unique_name::<unit::Entity, _>(db, &name, None).await?;
        let created = unit::ActiveModel {
            name: Set(name),
            state: Set(EntityState::Active),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!(id = created.id, "unit of measure created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: i64, name: &str) -> Result<unit::Model, ServiceError> {
        let db = &*self.db;
        let name = catalog::normalized_name(CatalogKind::Unit, name)?;
        let existing = catalog::get_entity::<unit::Entity, _>(db, id).await?;
        catalog::ensure_unique_name::<unit::Entity, _>(db, &name, Some(id)).await?;
        let mut active = existing.into_active_model();
        active.name = Set(name);
        Ok(active.update(db).await?)
    }

    /// Deletes a unit unless any document line still references it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let unit = catalog::get_entity::<unit::Entity, _>(db, id).await?;
        let receipt_refs = receipt_line::Entity::find()
            .filter(receipt_line::Column::UnitId.eq(id))
            .count(db)
            .await?;
        let shipment_refs = shipment_line::Entity::find()
            .filter(shipment_line::Column::UnitId.eq(id))
            .count(db)
            .await?;
        if receipt_refs > 0 || shipment_refs > 0 {
            return Err(ServiceError::Conflict(CatalogKind::Unit.in_use().to_string()));
        }
        catalog::delete_entity::<unit::Entity, _>(db, unit.id).await?;
        info!(id, "unit of measure deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, id: i64) -> Result<unit::Model, ServiceError> {
        catalog::archive_entity::<unit::Entity, _>(&*self.db, id).await
    }

    pub async fn bulk_archive(&self, ids: &[i64]) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for &id in ids {
            outcome.record(self.archive(id).await.map(|_| ()));
        }
        outcome
    }

    pub async fn bulk_delete(&self, ids: &[i64]) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for &id in ids {
            outcome.record(self.delete(id).await);
        }
        outcome
    }
}
