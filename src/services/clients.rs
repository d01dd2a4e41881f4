use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, Set,
};
use tracing::{info, instrument};

use crate::{
    entities::{client, shipment_document, EntityState},
    errors::ServiceError,
    messages::CatalogKind,
    services::catalog::{self, BulkOutcome},
};

/// Catalog service for clients.
#[derive(Clone)]
pub struct ClientService {
    db: Arc<DatabaseConnection>,
}

impl ClientService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, state: Option<EntityState>) -> Result<Vec<client::Model>, ServiceError> {
        catalog::list_entities::<client::Entity, _>(&*self.db, state).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str, address: &str) -> Result<client::Model, ServiceError> {
        let db = &*self.db;
        let name = catalog::normalized_name(CatalogKind::Client, name)?;
        catalog::ensure_unique_name::<client::Entity, _>(db, &name, None).await?;
        let created = client::ActiveModel {
            name: Set(name),
            address: Set(address.trim().to_string()),
            state: Set(EntityState::Active),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!(id = created.id, "client created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        address: &str,
    ) -> Result<client::Model, ServiceError> {
        let db = &*self.db;
        let name = catalog::normalized_name(CatalogKind::Client, name)?;
        let existing = catalog::get_entity::<client::Entity, _>(db, id).await?;
        catalog::ensure_unique_name::<client::Entity, _>(db, &name, Some(id)).await?;
        let mut active = existing.into_active_model();
        active.name = Set(name);
        active.address = Set(address.trim().to_string());
        Ok(active.update(db).await?)
    }

    /// Deletes a client unless any shipment document still references it.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let db = &*self.db;
        let client = catalog::get_entity::<client::Entity, _>(db, id).await?;
        let shipment_refs = shipment_document::Entity::find()
            .filter(shipment_document::Column::ClientId.eq(id))
            .count(db)
            .await?;
        if shipment_refs > 0 {
            return Err(ServiceError::Conflict(
                CatalogKind::Client.in_use().to_string(),
            ));
        }
        catalog::delete_entity::<client::Entity, _>(db, client.id).await?;
        info!(id, "client deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, id: i64) -> Result<client::Model, ServiceError> {
        catalog::archive_entity::<client::Entity, _>(&*self.db, id).await
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
