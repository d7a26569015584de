use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use skrotbil::coverage::{coverage_router, CoverageState, CoverageStore};
use skrotbil::dispatch::{dispatch_router, DispatchRepository, DispatchService};
use skrotbil::pricing::{pricing_router, PricingRepository, PricingService};

use crate::infra::AppState;

/// Compose the domain routers with the operational endpoints.
pub(crate) fn application_routes<P, C, D>(
    pricing: Arc<PricingService<P>>,
    coverage: CoverageState<C>,
    dispatch: Arc<DispatchService<D>>,
) -> axum::Router
where
    P: PricingRepository + 'static,
    C: CoverageStore + 'static,
    D: DispatchRepository + 'static,
{
    pricing_router(pricing)
        .merge(coverage_router(coverage))
        .merge(dispatch_router(dispatch))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
