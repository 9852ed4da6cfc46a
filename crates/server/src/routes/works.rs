use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use service::work_service;
use tracing::info;

use models::work;
use crate::{errors::JsonApiError, metrics, routes::ServerState};

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateWorkInput {
    pub vehicle_id: i32,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateWorkInput {
    /// One of `pending`, `in_progress`, `completed`, `cancelled`.
    pub status: String,
    pub description: Option<String>,
}

#[utoipa::path(
    get, path = "/works", tag = "works",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::WorkDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<work::Model>>, JsonApiError> {
    match work_service::list_works(&state.db).await {
        Ok(list) => {
            metrics::record("list_works", "ok");
            info!(count = list.len(), "list works");
            Ok(Json(list))
        }
        Err(e) => { metrics::record_err("list_works", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    post, path = "/works", tag = "works",
    request_body = CreateWorkInput,
    responses(
        (status = 201, description = "Created", body = crate::openapi::WorkDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Unknown vehicle"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<CreateWorkInput>) -> Result<(StatusCode, Json<work::Model>), JsonApiError> {
    match work_service::create_work(&state.db, input.vehicle_id, &input.description).await {
        Ok(w) => { metrics::record("create_work", "ok"); Ok((StatusCode::CREATED, Json(w))) }
        Err(e) => { metrics::record_err("create_work", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    get, path = "/works/{id}", tag = "works",
    params(("id" = i32, Path, description = "Work ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::WorkDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<work::Model>, JsonApiError> {
    match work_service::get_work(&state.db, id).await {
        Ok(Some(w)) => { metrics::record("get_work", "ok"); Ok(Json(w)) }
        Ok(None) => { metrics::record("get_work", "not_found"); Err(JsonApiError::not_found("Work", id)) }
        Err(e) => { metrics::record_err("get_work", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    put, path = "/works/{id}", tag = "works",
    params(("id" = i32, Path, description = "Work ID")),
    request_body = UpdateWorkInput,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::WorkDoc),
        (status = 400, description = "Unknown status or forbidden transition"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, Json(input): Json<UpdateWorkInput>) -> Result<Json<work::Model>, JsonApiError> {
    match work_service::update_work(&state.db, id, &input.status, input.description.as_deref()).await {
        Ok(Some(w)) => { metrics::record("update_work", "ok"); Ok(Json(w)) }
        Ok(None) => { metrics::record("update_work", "not_found"); Err(JsonApiError::not_found("Work", id)) }
        Err(e) => { metrics::record_err("update_work", &e); Err(e.into()) }
    }
}

#[utoipa::path(
    delete, path = "/works/{id}", tag = "works",
    params(("id" = i32, Path, description = "Work ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    match work_service::delete_work(&state.db, id).await {
        Ok(true) => { metrics::record("delete_work", "ok"); Ok(StatusCode::NO_CONTENT) }
        Ok(false) => { metrics::record("delete_work", "not_found"); Err(JsonApiError::not_found("Work", id)) }
        Err(e) => { metrics::record_err("delete_work", &e); Err(e.into()) }
    }
}
