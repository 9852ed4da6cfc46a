use crate::{client, vehicle, work, WorkStatus};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, PaginatorTrait, Set};
use anyhow::Result;

use super::{setup_test_db, unique_plate};

async fn insert_vehicle<C: sea_orm::ConnectionTrait>(db: &C, client_id: i32, plate: &str) -> Result<vehicle::Model> {
    let am = vehicle::ActiveModel {
        client_id: Set(client_id),
        license_plate: Set(plate.to_string()),
        brand: Set("Renault".into()),
        model: Set("Clio".into()),
        year: Set(2015),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Test client creation and lookup
#[tokio::test]
async fn test_client_create() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let c = client::create(&db, "Garage Test Client").await?;
    assert!(c.client_id > 0);
    assert!(client::exists(&db, c.client_id).await?);
    assert!(!client::exists(&db, c.client_id + 1000).await?);

    assert!(client::create(&db, "  ").await.is_err());
    Ok(())
}

/// Test vehicle CRUD operations at the entity level
#[tokio::test]
async fn test_vehicle_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let owner = client::create(&db, "Vehicle Owner").await?;
    let plate = unique_plate("CRUD");

    // Create: created_at is stamped by the entity behavior
    let created = insert_vehicle(&db, owner.client_id, &plate).await?;
    assert_eq!(created.license_plate, plate);
    assert!(created.vehicle_id > 0);

    // Read
    let found = vehicle::Entity::find_by_id(created.vehicle_id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));
    let by_plate = vehicle::find_by_plate(&db, &plate, None).await?;
    assert_eq!(by_plate.map(|v| v.vehicle_id), Some(created.vehicle_id));
    assert!(vehicle::find_by_plate(&db, &plate, Some(created.vehicle_id)).await?.is_none());

    // Update leaves created_at alone
    let mut am: vehicle::ActiveModel = created.clone().into();
    am.brand = Set("Dacia".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.brand, "Dacia");
    assert_eq!(updated.created_at, created.created_at);

    // Delete
    updated.delete(&db).await?;
    assert!(!vehicle::exists(&db, created.vehicle_id).await?);
    Ok(())
}

/// Plates are unique at the store level
#[tokio::test]
async fn test_duplicate_plate_rejected_by_store() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let owner = client::create(&db, "Plate Owner").await?;
    let plate = unique_plate("DUP");

    insert_vehicle(&db, owner.client_id, &plate).await?;
    let before = vehicle::Entity::find().count(&db).await?;
    assert!(insert_vehicle(&db, owner.client_id, &plate).await.is_err());
    assert_eq!(vehicle::Entity::find().count(&db).await?, before);
    Ok(())
}

/// Foreign keys are enforced by the store
#[tokio::test]
async fn test_foreign_keys_enforced() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    // Unknown client
    assert!(insert_vehicle(&db, 987_654, &unique_plate("FK")).await.is_err());

    // Unknown vehicle
    let orphan = work::ActiveModel {
        vehicle_id: Set(987_654),
        description: Set("Orphan job".into()),
        ..Default::default()
    };
    assert!(orphan.insert(&db).await.is_err());

    // Vehicle with works cannot be removed
    let owner = client::create(&db, "FK Owner").await?;
    let v = insert_vehicle(&db, owner.client_id, &unique_plate("FK")).await?;
    let w = work::ActiveModel {
        vehicle_id: Set(v.vehicle_id),
        description: Set("Brake pads".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(vehicle::Entity::delete_by_id(v.vehicle_id).exec(&db).await.is_err());
    assert!(vehicle::exists(&db, v.vehicle_id).await?);
    assert_eq!(work::count_for_vehicle(&db, v.vehicle_id).await?, 1);

    work::Entity::delete_by_id(w.work_id).exec(&db).await?;
    vehicle::Entity::delete_by_id(v.vehicle_id).exec(&db).await?;
    assert!(!vehicle::exists(&db, v.vehicle_id).await?);
    Ok(())
}

/// Work defaults and timestamp refresh
#[tokio::test]
async fn test_work_defaults_and_updated_at() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let owner = client::create(&db, "Work Owner").await?;
    let v = insert_vehicle(&db, owner.client_id, &unique_plate("WRK")).await?;

    let created = work::ActiveModel {
        vehicle_id: Set(v.vehicle_id),
        description: Set("Oil change".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(created.status, WorkStatus::Pending);
    assert_eq!(created.created_at, created.updated_at);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut am: work::ActiveModel = created.clone().into();
    am.status = Set(WorkStatus::InProgress);
    let updated = am.update(&db).await?;
    assert_eq!(updated.status, WorkStatus::InProgress);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let found = work::Entity::find_by_id(created.work_id).one(&db).await?.unwrap();
    assert_eq!(found, updated);
    Ok(())
}
