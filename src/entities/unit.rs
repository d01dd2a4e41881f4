use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use super::{CatalogEntity, EntityState};
use crate::messages::CatalogKind;

/// A unit of measure (piece, kilogram, litre, ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub state: EntityState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::balance::Entity")]
    Balance,
    #[sea_orm(has_many = "super::receipt_line::Entity")]
    ReceiptLine,
    #[sea_orm(has_many = "super::shipment_line::Entity")]
    ShipmentLine,
}

impl Related<super::balance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Balance.def()
    }
}

impl Related<super::receipt_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptLine.def()
    }
}

impl Related<super::shipment_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl CatalogEntity for Entity {
    type ActiveModel = ActiveModel;

    const KIND: CatalogKind = CatalogKind::Unit;

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
