use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::{DistanceRule, DistanceRuleDraft, QuoteRequest, RuleId};
use super::repository::{PricingRepository, RepositoryError};
use super::rules::RuleViolation;
use super::service::{PricingService, PricingServiceError};
use crate::tenant::TenantId;

/// Router builder exposing the pricing administration endpoints.
pub fn pricing_router<R>(service: Arc<PricingService<R>>) -> Router
where
    R: PricingRepository + 'static,
{
    Router::new()
        .route("/api/v1/quotes", post(quote_handler::<R>))
        .route(
            "/api/v1/tenants/:tenant_id/pricing/settings",
            get(settings_handler::<R>).put(save_settings_handler::<R>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/distance-rules",
            get(list_rules_handler::<R>).post(create_rule_handler::<R>),
        )
        .route(
            "/api/v1/tenants/:tenant_id/distance-rules/:rule_id",
            axum::routing::put(update_rule_handler::<R>).delete(delete_rule_handler::<R>),
        )
        .route("/api/v1/tenants/:tenant_id/offers", get(offers_handler::<R>))
        .with_state(service)
}

fn error_response(error: PricingServiceError) -> Response {
    let status = match &error {
        PricingServiceError::Rule(RuleViolation::Overlap { .. }) => StatusCode::CONFLICT,
        PricingServiceError::Rule(_) | PricingServiceError::Settings(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PricingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PricingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PricingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn quote_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    axum::Json(request): axum::Json<QuoteRequest>,
) -> Response
where
    R: PricingRepository + 'static,
{
    match service.quote(&request) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn settings_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    R: PricingRepository + 'static,
{
    match service.settings(&TenantId(tenant_id)) {
        Ok(settings) => (StatusCode::OK, axum::Json((*settings).clone())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_settings_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path(tenant_id): Path<String>,
    axum::Json(settings): axum::Json<super::settings::PricingSettings>,
) -> Response
where
    R: PricingRepository + 'static,
{
    match service.save_settings(&TenantId(tenant_id), settings) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "saved": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_rules_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path(tenant_id): Path<String>,
) -> Response
where
    R: PricingRepository + 'static,
{
    match service.distance_rules(&TenantId(tenant_id)) {
        Ok(rules) => (StatusCode::OK, axum::Json(rules)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Body for creating or replacing a distance rule; the tenant comes from the
/// path and, for updates, the id from the path as well.
#[derive(Debug, Deserialize)]
pub(crate) struct DistanceRuleBody {
    pub(crate) min_distance_km: f64,
    pub(crate) max_distance_km: Option<f64>,
    pub(crate) deduction_sek: i64,
}

pub(crate) async fn create_rule_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path(tenant_id): Path<String>,
    axum::Json(body): axum::Json<DistanceRuleBody>,
) -> Response
where
    R: PricingRepository + 'static,
{
    let draft = DistanceRuleDraft {
        tenant_id: TenantId(tenant_id),
        min_distance_km: body.min_distance_km,
        max_distance_km: body.max_distance_km,
        deduction_sek: body.deduction_sek,
    };

    match service.create_rule(draft) {
        Ok(rule) => (StatusCode::CREATED, axum::Json(rule)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_rule_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path((tenant_id, rule_id)): Path<(String, String)>,
    axum::Json(body): axum::Json<DistanceRuleBody>,
) -> Response
where
    R: PricingRepository + 'static,
{
    let rule = DistanceRule {
        id: RuleId(rule_id),
        tenant_id: TenantId(tenant_id),
        min_distance_km: body.min_distance_km,
        max_distance_km: body.max_distance_km,
        deduction_sek: body.deduction_sek,
    };

    match service.update_rule(rule) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "updated": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_rule_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path((tenant_id, rule_id)): Path<(String, String)>,
) -> Response
where
    R: PricingRepository + 'static,
{
    match service.delete_rule(&TenantId(tenant_id), &RuleId(rule_id)) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "deleted": true }))).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OffersQuery {
    pub(crate) as_of: Option<NaiveDate>,
}

pub(crate) async fn offers_handler<R>(
    State(service): State<Arc<PricingService<R>>>,
    Path(tenant_id): Path<String>,
    Query(query): Query<OffersQuery>,
) -> Response
where
    R: PricingRepository + 'static,
{
    let as_of = query.as_of.unwrap_or_else(|| Local::now().date_naive());
    match service.offers(&TenantId(tenant_id), as_of) {
        Ok(offers) => (StatusCode::OK, axum::Json(offers)).into_response(),
        Err(error) => error_response(error),
    }
}
