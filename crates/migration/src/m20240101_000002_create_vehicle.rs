//! Create `vehicle` table.
//! Plates are globally unique; a client cannot be removed while it owns vehicles.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(pk_auto(Vehicle::VehicleId))
                    .col(integer(Vehicle::ClientId).not_null())
                    .col(string_len(Vehicle::LicensePlate, 20).unique_key().not_null())
                    .col(string_len(Vehicle::Brand, 50).not_null())
                    .col(string_len(Vehicle::Model, 50).not_null())
                    .col(integer(Vehicle::Year).not_null())
                    .col(
                        timestamp_with_time_zone(Vehicle::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_client")
                            .from(Vehicle::Table, Vehicle::ClientId)
                            .to(Client::Table, Client::ClientId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_client_id")
                    .table(Vehicle::Table)
                    .col(Vehicle::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    VehicleId,
    ClientId,
    LicensePlate,
    Brand,
    Model,
    Year,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Client { Table, ClientId }
