//! Create `work` table.
//! Deleting a vehicle that still has works is rejected (`RESTRICT`), never cascaded.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(pk_auto(Work::WorkId))
                    .col(integer(Work::VehicleId).not_null())
                    .col(string_len(Work::Description, 255).not_null())
                    .col(string_len(Work::Status, 50).not_null().default("pending"))
                    .col(
                        timestamp_with_time_zone(Work::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Work::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_work_vehicle")
                            .from(Work::Table, Work::VehicleId)
                            .to(Vehicle::Table, Vehicle::VehicleId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_work_vehicle_id")
                    .table(Work::Table)
                    .col(Work::VehicleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Work::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Work {
    Table,
    WorkId,
    VehicleId,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vehicle { Table, VehicleId }
