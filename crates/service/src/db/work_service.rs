use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use models::{validation, vehicle, work, WorkStatus};
use tracing::info;

use super::{failed, in_txn};
use crate::errors::ServiceError;

/// List all works ordered by id.
pub async fn list_works(db: &DatabaseConnection) -> Result<Vec<work::Model>, ServiceError> {
    work::Entity::find()
        .order_by_asc(work::Column::WorkId)
        .all(db)
        .await
        .map_err(ServiceError::from)
        .inspect_err(|e| failed("list_works", None, e))
}

/// Get work by id.
pub async fn get_work(db: &DatabaseConnection, work_id: i32) -> Result<Option<work::Model>, ServiceError> {
    work::Entity::find_by_id(work_id)
        .one(db)
        .await
        .map_err(ServiceError::from)
        .inspect_err(|e| failed("get_work", Some(work_id), e))
}

/// Open a work on an existing vehicle. New works are always `pending`.
pub async fn create_work(db: &DatabaseConnection, vehicle_id: i32, description: &str) -> Result<work::Model, ServiceError> {
    let created = insert(db, vehicle_id, description)
        .await
        .inspect_err(|e| failed("create_work", Some(vehicle_id), e))?;
    info!(work_id = created.work_id, vehicle_id, "work created");
    Ok(created)
}

async fn insert(db: &DatabaseConnection, vehicle_id: i32, description: &str) -> Result<work::Model, ServiceError> {
    work::validate_vehicle_id(vehicle_id)?;
    work::validate_description(description)?;
    let description = description.to_string();
    in_txn(db, move |txn| {
        Box::pin(async move {
            if !vehicle::exists(txn, vehicle_id).await? {
                return Err(ServiceError::conflict(format!("vehicle {vehicle_id} does not exist")));
            }
            let am = work::ActiveModel {
                vehicle_id: Set(vehicle_id),
                description: Set(description),
                status: Set(WorkStatus::Pending),
                ..Default::default()
            };
            Ok(am.insert(txn).await?)
        })
    })
    .await
}

/// Set the status of a work and optionally replace its description.
/// Returns `None` when the work does not exist.
pub async fn update_work(
    db: &DatabaseConnection,
    work_id: i32,
    status: &str,
    description: Option<&str>,
) -> Result<Option<work::Model>, ServiceError> {
    let updated = apply_update(db, work_id, status, description)
        .await
        .inspect_err(|e| failed("update_work", Some(work_id), e))?;
    if let Some(w) = &updated {
        info!(work_id = w.work_id, status = %w.status, "work updated");
    }
    Ok(updated)
}

async fn apply_update(
    db: &DatabaseConnection,
    work_id: i32,
    status: &str,
    description: Option<&str>,
) -> Result<Option<work::Model>, ServiceError> {
    let next: WorkStatus = status.parse()?;
    let description = validation::present_text(description).map(str::to_owned);
    if let Some(d) = &description {
        work::validate_description(d)?;
    }
    in_txn(db, move |txn| {
        Box::pin(async move {
            let Some(existing) = work::Entity::find_by_id(work_id).one(txn).await? else {
                return Ok(None);
            };
            if !existing.status.can_transition_to(next) {
                return Err(ServiceError::Validation(format!(
                    "work {work_id} is {} and cannot become {next}",
                    existing.status
                )));
            }
            let mut am: work::ActiveModel = existing.into();
            am.status = Set(next);
            if let Some(d) = description {
                am.description = Set(d);
            }
            Ok(Some(am.update(txn).await?))
        })
    })
    .await
}

/// Delete a work; returns false if it did not exist.
pub async fn delete_work(db: &DatabaseConnection, work_id: i32) -> Result<bool, ServiceError> {
    let deleted = in_txn(db, move |txn| {
        Box::pin(async move {
            let res = work::Entity::delete_by_id(work_id).exec(txn).await?;
            Ok(res.rows_affected > 0)
        })
    })
    .await
    .inspect_err(|e| failed("delete_work", Some(work_id), e))?;
    if deleted {
        info!(work_id, "work deleted");
    }
    Ok(deleted)
}
