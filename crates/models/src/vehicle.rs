use sea_orm::{entity::prelude::*, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{client, errors::ModelError, validation, work};

pub const LICENSE_PLATE_MAX: usize = 20;
pub const BRAND_MAX: usize = 50;
pub const MODEL_MAX: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub vehicle_id: i32,
    pub client_id: i32,
    #[sea_orm(unique)]
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Client, Work }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Client => Entity::belongs_to(client::Entity)
                .from(Column::ClientId)
                .to(client::Column::ClientId)
                .into(),
            Relation::Work => Entity::has_many(work::Entity).into(),
        }
    }
}

impl Related<client::Entity> for Entity {
    fn to() -> RelationDef { Relation::Client.def() }
}

impl Related<work::Entity> for Entity {
    fn to() -> RelationDef { Relation::Work.def() }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(Utc::now().into());
        }
        Ok(self)
    }
}

pub fn validate_license_plate(p: &str) -> Result<(), ModelError> {
    validation::require_text("license_plate", p, LICENSE_PLATE_MAX)
}

pub fn validate_brand(b: &str) -> Result<(), ModelError> {
    validation::require_text("brand", b, BRAND_MAX)
}

pub fn validate_model(m: &str) -> Result<(), ModelError> {
    validation::require_text("model", m, MODEL_MAX)
}

pub fn validate_year(y: i32) -> Result<(), ModelError> {
    if y <= 0 {
        return Err(ModelError::Validation("year must be a positive integer".into()));
    }
    Ok(())
}

pub fn validate_client_id(id: i32) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation("client_id must be a positive integer".into()));
    }
    Ok(())
}

/// Check every field of a vehicle about to be created.
pub fn validate_new(client_id: i32, license_plate: &str, brand: &str, model: &str, year: i32) -> Result<(), ModelError> {
    validate_client_id(client_id)?;
    validate_license_plate(license_plate)?;
    validate_brand(brand)?;
    validate_model(model)?;
    validate_year(year)
}

/// Look up a vehicle by plate, optionally ignoring one id (the vehicle being updated).
pub async fn find_by_plate<C: ConnectionTrait>(db: &C, plate: &str, except: Option<i32>) -> Result<Option<Model>, DbErr> {
    let mut q = Entity::find().filter(Column::LicensePlate.eq(plate));
    if let Some(id) = except {
        q = q.filter(Column::VehicleId.ne(id));
    }
    q.one(db).await
}

pub async fn exists<C: ConnectionTrait>(db: &C, vehicle_id: i32) -> Result<bool, DbErr> {
    Ok(Entity::find_by_id(vehicle_id).one(db).await?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vehicle_fields_checked() {
        assert!(validate_new(1, "1234-ABC", "Seat", "Ibiza", 2018).is_ok());
        assert!(validate_new(0, "1234-ABC", "Seat", "Ibiza", 2018).is_err());
        assert!(validate_new(1, "", "Seat", "Ibiza", 2018).is_err());
        assert!(validate_new(1, &"P".repeat(21), "Seat", "Ibiza", 2018).is_err());
        assert!(validate_new(1, "1234-ABC", " ", "Ibiza", 2018).is_err());
        assert!(validate_new(1, "1234-ABC", "Seat", &"m".repeat(51), 2018).is_err());
        assert!(validate_new(1, "1234-ABC", "Seat", "Ibiza", 0).is_err());
    }
}
