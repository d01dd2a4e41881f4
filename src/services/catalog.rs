//! Generic CRUD over the catalog entity family.
//!
//! Resources, units of measure and clients share identity, a unique
//! non-blank name and an active/archived state; everything common is
//! implemented once here against the `CatalogEntity` capability trait.

use axum::http::StatusCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter};
use serde::Serialize;

use crate::{
    entities::{CatalogEntity, EntityState},
    errors::ServiceError,
    messages::CatalogKind,
};

pub async fn list_entities<E, C>(
    conn: &C,
    state: Option<EntityState>,
) -> Result<Vec<E::Model>, ServiceError>
where
    E: CatalogEntity,
    C: ConnectionTrait,
{
    let mut query = E::find();
    if let Some(state) = state {
        query = query.filter(E::state_column().eq(state));
    }
    query.all(conn).await.map_err(ServiceError::from)
}

pub async fn find_entity<E, C>(conn: &C, id: i64) -> Result<Option<E::Model>, ServiceError>
where
    E: CatalogEntity,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .one(conn)
        .await
        .map_err(ServiceError::from)
}

/// Point lookup that fails with the kind-specific not-found message.
pub async fn get_entity<E, C>(conn: &C, id: i64) -> Result<E::Model, ServiceError>
where
    E: CatalogEntity,
    C: ConnectionTrait,
{
    find_entity::<E, C>(conn, id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(E::KIND.not_found().to_string()))
}

/// Rejects blank names and trims surrounding whitespace.
pub fn normalized_name(kind: CatalogKind, name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::ValidationError(kind.blank_name().to_string()));
    }
    Ok(trimmed.to_string())
}

/// Fails with Conflict when another entity of the same kind already carries
/// this name. `exclude_id` lets updates keep their own name.
pub async fn ensure_unique_name<E, C>(
    conn: &C,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<(), ServiceError>
where
    E: CatalogEntity,
    C: ConnectionTrait,
{
    let existing = E::find()
        .filter(E::name_column().eq(name))
        .one(conn)
        .await?;
    if let Some(found) = existing {
        if exclude_id != Some(E::id_of(&found)) {
            return Err(ServiceError::Conflict(E::KIND.already_exists().to_string()));
        }
    }
    Ok(())
}

/// Archives by id. Archiving an already archived entity is rejected.
pub async fn archive_entity<E, C>(conn: &C, id: i64) -> Result<E::Model, ServiceError>
where
    E: CatalogEntity,
    E::Model: IntoActiveModel<<E as CatalogEntity>::ActiveModel>,
    C: ConnectionTrait,
{
    let model = get_entity::<E, C>(conn, id).await?;
    if E::state_of(&model) == EntityState::Archived {
        return Err(ServiceError::InvalidOperation(
            E::KIND.already_archived().to_string(),
        ));
    }
    E::with_state(model, EntityState::Archived)
        .update(conn)
        .await
        .map_err(ServiceError::from)
}

pub async fn delete_entity<E, C>(conn: &C, id: i64) -> Result<(), ServiceError>
where
    E: CatalogEntity,
    C: ConnectionTrait,
{
    E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

/// Aggregated result of a bulk catalog operation.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub succeeded: u32,
    pub not_found: u32,
    pub conflicts: u32,
    pub failed: u32,
}

impl BulkOutcome {
    pub fn record(&mut self, result: Result<(), ServiceError>) {
        match result {
            Ok(()) => self.succeeded += 1,
            Err(ServiceError::NotFound(_)) => self.not_found += 1,
            Err(ServiceError::Conflict(_)) | Err(ServiceError::InvalidOperation(_)) => {
                self.conflicts += 1
            }
            Err(_) => self.failed += 1,
        }
    }

    /// Combined status, precedence: failure > not-found > conflict > success.
    pub fn status(&self) -> StatusCode {
        if self.failed > 0 {
            StatusCode::INTERNAL_SERVER_ERROR
        } else if self.not_found > 0 {
            StatusCode::NOT_FOUND
        } else if self.conflicts > 0 {
            StatusCode::CONFLICT
        } else {
            StatusCode::OK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_name_rejects_blank() {
        assert!(normalized_name(CatalogKind::Resource, "   ").is_err());
        assert_eq!(
            normalized_name(CatalogKind::Resource, "  steel  ").unwrap(),
            "steel"
        );
    }

    #[test]
    fn bulk_outcome_status_precedence() {
        let mut outcome = BulkOutcome::default();
        outcome.record(Ok(()));
        assert_eq!(outcome.status(), StatusCode::OK);

        outcome.record(Err(ServiceError::Conflict("in use".into())));
        assert_eq!(outcome.status(), StatusCode::CONFLICT);

        outcome.record(Err(ServiceError::NotFound("missing".into())));
        assert_eq!(outcome.status(), StatusCode::NOT_FOUND);

        outcome.record(Err(ServiceError::InternalError("boom".into())));
        assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.conflicts, 1);
        assert_eq!(outcome.not_found, 1);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn already_archived_counts_as_conflict() {
        let mut outcome = BulkOutcome::default();
        outcome.record(Err(ServiceError::InvalidOperation(
            "already archived".into(),
        )));
        assert_eq!(outcome.conflicts, 1);
    }
}
