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

use super::domain::{PostalCodeId, RegionId};
use super::register::PostalCodeRegister;
use super::repository::CoverageStore;
use super::service::CoverageService;
use crate::tenant::TenantId;

/// Shared state for the coverage endpoints: the tenant selection service
/// plus the read-only postal register.
pub struct CoverageState<R> {
    pub service: Arc<CoverageService<R>>,
    pub register: Arc<PostalCodeRegister>,
}

impl<R> Clone for CoverageState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            register: self.register.clone(),
        }
    }
}

/// Router builder exposing the coverage administration endpoints.
pub fn coverage_router<R>(state: CoverageState<R>) -> Router
where
    R: CoverageStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/tenants/:tenant_id/coverage",
            get(selection_handler::<R>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/coverage/toggle",
            post(toggle_handler::<R>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/coverage/regions",
            get(region_statuses_handler::<R>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/coverage/regions/:region_id",
            post(select_region_handler::<R>).delete(deselect_region_handler::<R>),
        )
        .with_state(state)
}

fn store_error(error: super::repository::CoverageStoreError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

fn unknown_region(region_id: &str) -> Response {
    let payload = json!({ "error": format!("unknown region '{region_id}'") });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

pub(crate) async fn selection_handler<R>(
    State(state): State<CoverageState<R>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    R: CoverageStore + 'static,
{
    match state.service.selected(&TenantId(tenant_id)) {
        Ok(selected) => {
            let codes: Vec<&str> = selected.iter().map(|code| code.0.as_str()).collect();
            (StatusCode::OK, axum::Json(json!({ "selected": codes }))).into_response()
        }
        Err(error) => store_error(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleBody {
    pub(crate) postal_code: String,
}

pub(crate) async fn toggle_handler<R>(
    State(state): State<CoverageState<R>>,
    Path(tenant_id): Path<String>,
    axum::Json(body): axum::Json<ToggleBody>,
) -> Response
where
    R: CoverageStore + 'static,
{
    let code = PostalCodeId(body.postal_code);
    if state.register.postal_code(&code).is_none() {
        let payload = json!({ "error": format!("unknown postal code '{}'", code.0) });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    match state.service.toggle(&TenantId(tenant_id), &code) {
        Ok(outcome) => (StatusCode::OK, axum::Json(json!({ "toggled": outcome }))).into_response(),
        Err(error) => store_error(error),
    }
}

pub(crate) async fn region_statuses_handler<R>(
    State(state): State<CoverageState<R>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    R: CoverageStore + 'static,
{
    let tenant = TenantId(tenant_id);
    let mut rows = Vec::new();
    for region in state.register.regions() {
        match state.service.region_status(&tenant, region) {
            Ok(status) => rows.push(json!({
                "region_id": region.id.0,
                "name": region.name,
                "selected": status.selected,
                "total": status.total,
                "level": status.level().label(),
            })),
            Err(error) => return store_error(error),
        }
    }

    (StatusCode::OK, axum::Json(rows)).into_response()
}

pub(crate) async fn select_region_handler<R>(
    State(state): State<CoverageState<R>>,
    Path((tenant_id, region_id)): Path<(String, String)>,
) -> Response
where
    R: CoverageStore + 'static,
{
    let Some(region) = state.register.region(&RegionId(region_id.clone())) else {
        return unknown_region(&region_id);
    };

    match state.service.select_region(&TenantId(tenant_id), region) {
        Ok(selection) if selection.already_complete => {
            let payload = json!({
                "added": 0,
                "message": format!("region '{}' is already fully selected", region.name),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(selection) => {
            (StatusCode::OK, axum::Json(json!({ "added": selection.added }))).into_response()
        }
        Err(error) => store_error(error),
    }
}

pub(crate) async fn deselect_region_handler<R>(
    State(state): State<CoverageState<R>>,
    Path((tenant_id, region_id)): Path<(String, String)>,
) -> Response
where
    R: CoverageStore + 'static,
{
    let Some(region) = state.register.region(&RegionId(region_id.clone())) else {
        return unknown_region(&region_id);
    };

    match state.service.deselect_region(&TenantId(tenant_id), region) {
        Ok(removed) => (StatusCode::OK, axum::Json(json!({ "removed": removed }))).into_response(),
        Err(error) => store_error(error),
    }
}
