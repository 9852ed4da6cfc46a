#![cfg(test)]
use std::sync::atomic::{AtomicU32, Ordering};

use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::{client, db::connect_with_config};
use sea_orm::DatabaseConnection;

static SEQ: AtomicU32 = AtomicU32::new(0);

/// A freshly migrated database per test: `TEST_DATABASE_URL` when set,
/// otherwise a private in-memory SQLite store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let url = std::env::var("TEST_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
    let cfg = DatabaseConfig { url, acquire_timeout_secs: 10, ..DatabaseConfig::default() };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Plate unique within the test process and short enough for the column.
pub fn short_plate() -> String {
    let n = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("T{}-{n:05}", std::process::id() % 100_000)
}

pub async fn seed_client(db: &DatabaseConnection) -> Result<i32, anyhow::Error> {
    let n = SEQ.fetch_add(1, Ordering::Relaxed);
    Ok(client::create(db, &format!("Test client {n}")).await?.client_id)
}

pub async fn seed_vehicle(db: &DatabaseConnection) -> Result<i32, anyhow::Error> {
    let owner = seed_client(db).await?;
    let v = crate::vehicle_service::create_vehicle(db, owner, &short_plate(), "Peugeot", "208", 2020).await?;
    Ok(v.vehicle_id)
}
