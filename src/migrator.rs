//! Embedded schema migrations.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_document_tables::Migration),
            Box::new(m20240101_000003_create_balances_table::Migration),
        ]
    }
}

mod m20240101_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Resources::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Resources::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Resources::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Resources::State).string_len(16).not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Units::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Units::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Units::Name).string().not_null().unique_key())
                        .col(ColumnDef::new(Units::State).string_len(16).not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Clients::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Clients::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Clients::Address).string().not_null())
                        .col(ColumnDef::new(Clients::State).string_len(16).not_null())
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Units::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Resources::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Resources {
        Table,
        Id,
        Name,
        State,
    }

    #[derive(DeriveIden)]
    pub enum Units {
        Table,
        Id,
        Name,
        State,
    }

    #[derive(DeriveIden)]
    pub enum Clients {
        Table,
        Id,
        Name,
        Address,
        State,
    }
}

mod m20240101_000002_create_document_tables {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::{Clients, Resources, Units};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_document_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ReceiptDocuments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReceiptDocuments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ReceiptDocuments::Number)
                                .big_integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ReceiptDocuments::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReceiptLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReceiptLines::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ReceiptLines::DocumentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReceiptLines::ResourceId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReceiptLines::UnitId).big_integer().not_null())
                        .col(
                            ColumnDef::new(ReceiptLines::Count)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_receipt_lines_document")
                                .from(ReceiptLines::Table, ReceiptLines::DocumentId)
                                .to(ReceiptDocuments::Table, ReceiptDocuments::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_receipt_lines_resource")
                                .from(ReceiptLines::Table, ReceiptLines::ResourceId)
                                .to(Resources::Table, Resources::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_receipt_lines_unit")
                                .from(ReceiptLines::Table, ReceiptLines::UnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_receipt_lines_document_id")
                        .table(ReceiptLines::Table)
                        .col(ReceiptLines::DocumentId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ShipmentDocuments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ShipmentDocuments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDocuments::Number)
                                .big_integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDocuments::ClientId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDocuments::Date)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentDocuments::State)
                                .string_len(16)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipment_documents_client")
                                .from(ShipmentDocuments::Table, ShipmentDocuments::ClientId)
                                .to(Clients::Table, Clients::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ShipmentLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ShipmentLines::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ShipmentLines::DocumentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentLines::ResourceId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentLines::UnitId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ShipmentLines::Count)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipment_lines_document")
                                .from(ShipmentLines::Table, ShipmentLines::DocumentId)
                                .to(ShipmentDocuments::Table, ShipmentDocuments::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipment_lines_resource")
                                .from(ShipmentLines::Table, ShipmentLines::ResourceId)
                                .to(Resources::Table, Resources::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shipment_lines_unit")
                                .from(ShipmentLines::Table, ShipmentLines::UnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_shipment_lines_document_id")
                        .table(ShipmentLines::Table)
                        .col(ShipmentLines::DocumentId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ShipmentLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ShipmentDocuments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReceiptLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ReceiptDocuments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum ReceiptDocuments {
        Table,
        Id,
        Number,
        Date,
    }

    #[derive(DeriveIden)]
    pub enum ReceiptLines {
        Table,
        Id,
        DocumentId,
        ResourceId,
        UnitId,
        Count,
    }

    #[derive(DeriveIden)]
    pub enum ShipmentDocuments {
        Table,
        Id,
        Number,
        ClientId,
        Date,
        State,
    }

    #[derive(DeriveIden)]
    pub enum ShipmentLines {
        Table,
        Id,
        DocumentId,
        ResourceId,
        UnitId,
        Count,
    }
}

mod m20240101_000003_create_balances_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_catalog_tables::{Resources, Units};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_balances_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Balances::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Balances::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Balances::ResourceId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Balances::UnitId).big_integer().not_null())
                        .col(
                            ColumnDef::new(Balances::Count)
                                .decimal_len(16, 4)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_balances_resource")
                                .from(Balances::Table, Balances::ResourceId)
                                .to(Resources::Table, Resources::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_balances_unit")
                                .from(Balances::Table, Balances::UnitId)
                                .to(Units::Table, Units::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_balances_resource_unit")
                        .table(Balances::Table)
                        .col(Balances::ResourceId)
                        .col(Balances::UnitId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Balances::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Balances {
        Table,
        Id,
        ResourceId,
        UnitId,
        Count,
    }
}
