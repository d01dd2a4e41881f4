use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use super::{CatalogEntity, EntityState};
use crate::messages::CatalogKind;

/// A client shipments are issued to. Carries a free-form address on top of
/// the common catalog fields.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub address: String,
    pub state: EntityState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shipment_document::Entity")]
    ShipmentDocument,
}

impl Related<super::shipment_document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentDocument.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    type ActiveModel = ActiveModel;

    const KIND: CatalogKind = CatalogKind::Client;

    fn id_column() -> Column {
        Column::Id
    }

    fn name_column() -> Column {
        Column::Name
    }

    fn state_column() -> Column {
        Column::State
    }

    fn id_of(model: &Model) -> i64 {
        model.id
    }

    fn name_of(model: &Model) -> &str {
        &model.name
    }

    fn state_of(model: &Model) -> EntityState {
        model.state
    }

    fn with_state(model: Model, state: EntityState) -> ActiveModel {
        let mut active = model.into_active_model();
        active.state = Set(state);
        active
    }
}
