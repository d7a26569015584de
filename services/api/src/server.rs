use crate::cli::ServeArgs;
use crate::infra::{
    load_register, AppState, InMemoryCoverageStore, InMemoryDispatchRepository,
    InMemoryPricingRepository,
};
use crate::routes::application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use skrotbil::config::AppConfig;
use skrotbil::coverage::{CoverageService, CoverageState};
use skrotbil::dispatch::DispatchService;
use skrotbil::error::AppError;
use skrotbil::pricing::PricingService;
use skrotbil::telemetry;
use skrotbil::tenant::TenantId;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let register = Arc::new(load_register()?);
    info!(codes = register.code_count(), "postal register loaded");

    let pricing_repository = Arc::new(InMemoryPricingRepository::default());
    pricing_repository.seed_offers(&TenantId(config.demo_tenant.clone()));
    let pricing_service = Arc::new(PricingService::new(pricing_repository));

    let coverage_state = CoverageState {
        service: Arc::new(CoverageService::new(Arc::new(
            InMemoryCoverageStore::default(),
        ))),
        register,
    };

    let dispatch_service = Arc::new(DispatchService::new(Arc::new(
        InMemoryDispatchRepository::default(),
    )));

    let app = application_routes(pricing_service, coverage_state, dispatch_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scrap pickup operations service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
