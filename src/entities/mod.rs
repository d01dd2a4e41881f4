//! Database entities for the warehouse domain.

pub mod balance;
pub mod client;
pub mod receipt_document;
pub mod receipt_line;
pub mod resource;
pub mod shipment_document;
pub mod shipment_line;
pub mod unit;

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait};
use serde::{Deserialize, Serialize};

pub use shipment_document::DocumentState;

use crate::messages::CatalogKind;

/// Lifecycle state shared by every catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// Capability interface over the named, stateful catalog entities
/// (resources, units of measure, clients).
///
/// One generic CRUD implementation in `services::catalog` serves all three
/// kinds through this trait; the per-kind services only add what genuinely
/// differs (extra fields, reference guards).
pub trait CatalogEntity: EntityTrait {
    type ActiveModel: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send;

    const KIND: CatalogKind;

    fn id_column() -> Self::Column;
    fn name_column() -> Self::Column;
    fn state_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> i64;
    fn name_of(model: &Self::Model) -> &str;
    fn state_of(model: &Self::Model) -> EntityState;

    /// Converts a fetched row into an active model with the given state set.
    fn with_state(model: Self::Model, state: EntityState) -> <Self as CatalogEntity>::ActiveModel;
}
