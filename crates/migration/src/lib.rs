//! Migrator registering entity-specific migrations in dependency order.
//! `client` must exist before `vehicle`, and `vehicle` before `work`.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_client;
mod m20240101_000002_create_vehicle;
mod m20240101_000003_create_work;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_client::Migration),
            Box::new(m20240101_000002_create_vehicle::Migration),
            Box::new(m20240101_000003_create_work::Migration),
        ]
    }
}
