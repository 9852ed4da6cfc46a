use std::{fmt, str::FromStr};

use sea_orm::{entity::prelude::*, sea_query::StringLen, PaginatorTrait, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, validation, vehicle};

pub const DESCRIPTION_MAX: usize = 255;

/// Lifecycle of a repair job. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl WorkStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkStatus::Pending => "pending",
            WorkStatus::InProgress => "in_progress",
            WorkStatus::Completed => "completed",
            WorkStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WorkStatus::Completed | WorkStatus::Cancelled)
    }

    /// A terminal status may only be re-applied; anything else may move anywhere.
    pub fn can_transition_to(self, next: WorkStatus) -> bool {
        self == next || !self.is_terminal()
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(WorkStatus::Pending),
            "in_progress" => Ok(WorkStatus::InProgress),
            "completed" => Ok(WorkStatus::Completed),
            "cancelled" => Ok(WorkStatus::Cancelled),
            other => Err(ModelError::Validation(format!(
                "unknown status '{other}' (expected pending, in_progress, completed or cancelled)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub work_id: i32,
    pub vehicle_id: i32,
    pub description: String,
    pub status: WorkStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Vehicle }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vehicle => Entity::belongs_to(vehicle::Entity)
                .from(Column::VehicleId)
                .to(vehicle::Column::VehicleId)
                .into(),
        }
    }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef { Relation::Vehicle.def() }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Every write refreshes `updated_at`; inserts also stamp `created_at`
    /// and default the status.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now: DateTimeWithTimeZone = Utc::now().into();
        if insert {
            if self.created_at.is_not_set() {
                self.created_at = Set(now);
            }
            if self.status.is_not_set() {
                self.status = Set(WorkStatus::Pending);
            }
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

pub fn validate_description(d: &str) -> Result<(), ModelError> {
    validation::require_text("description", d, DESCRIPTION_MAX)
}

pub fn validate_vehicle_id(id: i32) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation("vehicle_id must be a positive integer".into()));
    }
    Ok(())
}

/// Number of works still attached to a vehicle.
pub async fn count_for_vehicle<C: ConnectionTrait>(db: &C, vehicle_id: i32) -> Result<u64, DbErr> {
    Entity::find().filter(Column::VehicleId.eq(vehicle_id)).count(db).await
}
