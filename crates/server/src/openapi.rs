use chrono::{DateTime, Utc};
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::routes::{vehicles, works};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct VehicleDoc {
    pub vehicle_id: i32,
    pub client_id: i32,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(utoipa::ToSchema)]
pub struct WorkDoc {
    pub work_id: i32,
    pub vehicle_id: i32,
    pub description: String,
    /// `pending`, `in_progress`, `completed` or `cancelled`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(utoipa::ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        vehicles::list,
        vehicles::create,
        vehicles::get,
        vehicles::update,
        vehicles::delete,
        works::list,
        works::create,
        works::get,
        works::update,
        works::delete,
    ),
    components(
        schemas(
            HealthResponse,
            VehicleDoc,
            WorkDoc,
            ErrorDoc,
            vehicles::CreateVehicleInput,
            vehicles::UpdateVehicleInput,
            works::CreateWorkInput,
            works::UpdateWorkInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "vehicles"),
        (name = "works")
    )
)]
pub struct ApiDoc;
