use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An inbound goods document. Effective as soon as created: its balance
/// effect is applied at creation and reversed at deletion.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub number: i64,
    pub date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::receipt_line::Entity")]
    ReceiptLine,
}

impl Related<super::receipt_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReceiptLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
