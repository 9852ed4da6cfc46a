use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use models::{client, validation, vehicle, work};
use tracing::info;

use super::{failed, in_txn};
use crate::errors::ServiceError;

/// List all vehicles ordered by id.
pub async fn list_vehicles(db: &DatabaseConnection) -> Result<Vec<vehicle::Model>, ServiceError> {
    vehicle::Entity::find()
        .order_by_asc(vehicle::Column::VehicleId)
        .all(db)
        .await
        .map_err(ServiceError::from)
        .inspect_err(|e| failed("list_vehicles", None, e))
}

/// Get vehicle by id.
pub async fn get_vehicle(db: &DatabaseConnection, vehicle_id: i32) -> Result<Option<vehicle::Model>, ServiceError> {
    vehicle::Entity::find_by_id(vehicle_id)
        .one(db)
        .await
        .map_err(ServiceError::from)
        .inspect_err(|e| failed("get_vehicle", Some(vehicle_id), e))
}

/// Register a vehicle for an existing client.
pub async fn create_vehicle(
    db: &DatabaseConnection,
    client_id: i32,
    license_plate: &str,
    brand: &str,
    model: &str,
    year: i32,
) -> Result<vehicle::Model, ServiceError> {
    let created = insert(db, client_id, license_plate, brand, model, year)
        .await
        .inspect_err(|e| failed("create_vehicle", None, e))?;
    info!(vehicle_id = created.vehicle_id, client_id, plate = %created.license_plate, "vehicle created");
    Ok(created)
}

async fn insert(
    db: &DatabaseConnection,
    client_id: i32,
    license_plate: &str,
    brand: &str,
    model: &str,
    year: i32,
) -> Result<vehicle::Model, ServiceError> {
    vehicle::validate_new(client_id, license_plate, brand, model, year)?;
    let plate = license_plate.to_string();
    let brand = brand.to_string();
    let model = model.to_string();
    in_txn(db, move |txn| {
        Box::pin(async move {
            ensure_client(txn, client_id).await?;
            ensure_plate_free(txn, &plate, None).await?;
            let am = vehicle::ActiveModel {
                client_id: Set(client_id),
                license_plate: Set(plate),
                brand: Set(brand),
                model: Set(model),
                year: Set(year),
                ..Default::default()
            };
            Ok(am.insert(txn).await?)
        })
    })
    .await
}

/// Update a vehicle. Absent fields keep their value, and so do blank ones
/// (`0`, empty or whitespace-only): none of these columns can hold a blank.
/// Returns `None` when the vehicle does not exist.
pub async fn update_vehicle(
    db: &DatabaseConnection,
    vehicle_id: i32,
    client_id: Option<i32>,
    license_plate: Option<&str>,
    brand: Option<&str>,
    model: Option<&str>,
    year: Option<i32>,
) -> Result<Option<vehicle::Model>, ServiceError> {
    let patch = VehiclePatch {
        client_id: validation::present_int(client_id),
        license_plate: validation::present_text(license_plate).map(str::to_owned),
        brand: validation::present_text(brand).map(str::to_owned),
        model: validation::present_text(model).map(str::to_owned),
        year: validation::present_int(year),
    };
    let updated = apply_patch(db, vehicle_id, patch)
        .await
        .inspect_err(|e| failed("update_vehicle", Some(vehicle_id), e))?;
    if let Some(v) = &updated {
        info!(vehicle_id = v.vehicle_id, "vehicle updated");
    }
    Ok(updated)
}

struct VehiclePatch {
    client_id: Option<i32>,
    license_plate: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    year: Option<i32>,
}

impl VehiclePatch {
    fn validate(&self) -> Result<(), ServiceError> {
        if let Some(c) = self.client_id { vehicle::validate_client_id(c)?; }
        if let Some(p) = &self.license_plate { vehicle::validate_license_plate(p)?; }
        if let Some(b) = &self.brand { vehicle::validate_brand(b)?; }
        if let Some(m) = &self.model { vehicle::validate_model(m)?; }
        if let Some(y) = self.year { vehicle::validate_year(y)?; }
        Ok(())
    }
}

async fn apply_patch(db: &DatabaseConnection, vehicle_id: i32, patch: VehiclePatch) -> Result<Option<vehicle::Model>, ServiceError> {
    patch.validate()?;
    in_txn(db, move |txn| {
        Box::pin(async move {
            let Some(existing) = vehicle::Entity::find_by_id(vehicle_id).one(txn).await? else {
                return Ok(None);
            };
            let mut am: vehicle::ActiveModel = existing.clone().into();
            if let Some(c) = patch.client_id {
                if c != existing.client_id { ensure_client(txn, c).await?; }
                am.client_id = Set(c);
            }
            if let Some(p) = patch.license_plate {
                if p != existing.license_plate { ensure_plate_free(txn, &p, Some(vehicle_id)).await?; }
                am.license_plate = Set(p);
            }
            if let Some(b) = patch.brand { am.brand = Set(b); }
            if let Some(m) = patch.model { am.model = Set(m); }
            if let Some(y) = patch.year { am.year = Set(y); }
            if !am.is_changed() {
                return Ok(Some(existing));
            }
            Ok(Some(am.update(txn).await?))
        })
    })
    .await
}

/// Delete a vehicle; returns false if it did not exist.
/// A vehicle that still has works is a conflict and is left in place.
pub async fn delete_vehicle(db: &DatabaseConnection, vehicle_id: i32) -> Result<bool, ServiceError> {
    let deleted = in_txn(db, move |txn| {
        Box::pin(async move {
            if !vehicle::exists(txn, vehicle_id).await? {
                return Ok(false);
            }
            let works = work::count_for_vehicle(txn, vehicle_id).await?;
            if works > 0 {
                return Err(ServiceError::conflict(format!(
                    "vehicle {vehicle_id} still has {works} work record(s)"
                )));
            }
            let res = vehicle::Entity::delete_by_id(vehicle_id).exec(txn).await?;
            Ok(res.rows_affected > 0)
        })
    })
    .await
    .inspect_err(|e| failed("delete_vehicle", Some(vehicle_id), e))?;
    if deleted {
        info!(vehicle_id, "vehicle deleted");
    }
    Ok(deleted)
}

async fn ensure_client<C: ConnectionTrait>(db: &C, client_id: i32) -> Result<(), ServiceError> {
    if !client::exists(db, client_id).await? {
        return Err(ServiceError::conflict(format!("client {client_id} does not exist")));
    }
    Ok(())
}

async fn ensure_plate_free<C: ConnectionTrait>(db: &C, plate: &str, except: Option<i32>) -> Result<(), ServiceError> {
    if vehicle::find_by_plate(db, plate, except).await?.is_some() {
        return Err(ServiceError::conflict(format!("license plate {plate} is already registered")));
    }
    Ok(())
}
