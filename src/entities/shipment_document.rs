use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Signing state of a shipment document.
///
/// `NotSigned --sign--> Signed --withdraw--> NotSigned`; balance is debited
/// on sign and credited back on withdraw. No terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    #[sea_orm(string_value = "not_signed")]
    NotSigned,
    #[sea_orm(string_value = "signed")]
    Signed,
}

/// An outbound goods document addressed to a client.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipment_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub number: i64,
    pub client_id: i64,
    pub date: DateTimeUtc,
    pub state: DocumentState,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(has_many = "super::shipment_line::Entity")]
    ShipmentLine,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::shipment_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShipmentLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
