use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::vehicle_service;
use tracing::info;

use models::vehicle;
use crate::{errors::JsonApiError, metrics, routes::ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateVehicleInput {
    pub client_id: i32,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
}

/// Every field optional; absent or blank fields keep their current value.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateVehicleInput {
    pub client_id: Option<i32>,
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
}

#[utoipa::path(
    get, path = "/vehicles", tag = "vehicles",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::VehicleDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<vehicle::Model>>, JsonApiError> {
    match vehicle_service::list_vehicles(&state.db).await {
        Ok(list) => {
            metrics::record("list_vehicles", "ok");
            info!(count = list.len(), "list vehicles");
            Ok(Json(list))
        }
        Err(e) => { metrics::record_err("list_vehicles", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    post, path = "/vehicles", tag = "vehicles",
    request_body = CreateVehicleInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate plate or unknown client"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CreateVehicleInput>) -> Result<(StatusCode, Json<vehicle::Model>), JsonApiError> {
    match vehicle_service::create_vehicle(&state.db, input.client_id, &input.license_plate, &input.brand, &input.model, input.year).await {
        Ok(v) => { metrics::record("create_vehicle", "ok"); Ok((StatusCode::CREATED, Json(v))) }
        Err(e) => { metrics::record_err("create_vehicle", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    get, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VehicleDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<vehicle::Model>, JsonApiError> {
    match vehicle_service::get_vehicle(&state.db, id).await {
        Ok(Some(v)) => { metrics::record("get_vehicle", "ok"); Ok(Json(v)) }
        Ok(None) => { metrics::record("get_vehicle", "not_found"); Err(JsonApiError::not_found("Vehicle", id)) }
        Err(e) => { metrics::record_err("get_vehicle", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    put, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Duplicate plate or unknown client"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, Json(input): Json<UpdateVehicleInput>) -> Result<Json<vehicle::Model>, JsonApiError> {
    match vehicle_service::update_vehicle(
        &state.db,
        id,
        input.client_id,
        input.license_plate.as_deref(),
        input.brand.as_deref(),
        input.model.as_deref(),
        input.year,
    ).await {
        Ok(Some(v)) => { metrics::record("update_vehicle", "ok"); Ok(Json(v)) }
        Ok(None) => { metrics::record("update_vehicle", "not_found"); Err(JsonApiError::not_found("Vehicle", id)) }
        Err(e) => { metrics::record_err("update_vehicle", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    delete, path = "/vehicles/{id}", tag = "vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Vehicle still has works"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    match vehicle_service::delete_vehicle(&state.db, id).await {
        Ok(true) => { metrics::record("delete_vehicle", "ok"); Ok(StatusCode::NO_CONTENT) }
        Ok(false) => { metrics::record("delete_vehicle", "not_found"); Err(JsonApiError::not_found("Vehicle", id)) }
        Err(e) => { metrics::record_err("delete_vehicle", &e); Err(e.into()) }
    }
}
