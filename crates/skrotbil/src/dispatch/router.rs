use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DriverId, IntakeSubmission, OrderId, PickupStatus};
use super::repository::{DispatchRepository, DispatchStoreError};
use super::service::{DispatchError, DispatchService, PickupStatusService};
use crate::tenant::TenantId;

/// Router builder exposing intake and pickup lifecycle endpoints.
pub fn dispatch_router<R>(service: Arc<DispatchService<R>>) -> Router
where
    R: DispatchRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/tenants/:tenant_id/pickups",
            post(intake_handler::<R>),
        )
        .route("/api/v1/pickups/:order_id", get(order_handler::<R>))
        .route(
            "/api/v1/pickups/:order_id/status",
            post(status_handler::<R>),
        )
        .route(
            "/api/v1/pickups/:order_id/driver",
            post(assign_handler::<R>),
        )
        .with_state(service)
}

fn error_response(error: DispatchError) -> Response {
    let status = match &error {
        DispatchError::IllegalTransition { .. } | DispatchError::NotAssignable { .. } => {
            StatusCode::CONFLICT
        }
        DispatchError::Store(DispatchStoreError::NotFound) => StatusCode::NOT_FOUND,
        DispatchError::Store(DispatchStoreError::Conflict) => StatusCode::CONFLICT,
        DispatchError::Store(DispatchStoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn intake_handler<R>(
    State(service): State<Arc<DispatchService<R>>>,
    Path(tenant_id): Path<String>,
    axum::Json(submission): axum::Json<IntakeSubmission>,
) -> Response
where
    R: DispatchRepository + 'static,
{
    match service.intake(&TenantId(tenant_id), submission) {
        Ok(order) => (StatusCode::CREATED, axum::Json(order)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn order_handler<R>(
    State(service): State<Arc<DispatchService<R>>>,
    Path(order_id): Path<String>,
) -> Response
where
    R: DispatchRepository + 'static,
{
    match service.order(&OrderId(order_id)) {
        Ok(order) => (StatusCode::OK, axum::Json(order)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    pub(crate) status: PickupStatus,
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<DispatchService<R>>>,
    Path(order_id): Path<String>,
    axum::Json(body): axum::Json<StatusBody>,
) -> Response
where
    R: DispatchRepository + 'static,
{
    match service.transition(&OrderId(order_id), body.status) {
        Ok(order) => (StatusCode::OK, axum::Json(order)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignBody {
    pub(crate) driver_id: String,
}

pub(crate) async fn assign_handler<R>(
    State(service): State<Arc<DispatchService<R>>>,
    Path(order_id): Path<String>,
    axum::Json(body): axum::Json<AssignBody>,
) -> Response
where
    R: DispatchRepository + 'static,
{
    match service.assign_driver(&OrderId(order_id), DriverId(body.driver_id)) {
        Ok(order) => (StatusCode::OK, axum::Json(order)).into_response(),
        Err(error) => error_response(error),
    }
}
