use crate::cli::ServeArgs;
use crate::infra::{AppState, InsightsService};
use crate::routes::insights_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fairway_insights::config::AppConfig;
use fairway_insights::error::AppError;
use fairway_insights::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let insights = Arc::new(InsightsService::from_config(&config.insights)?);
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        insights,
    };

    let app = insights_router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fairway insights service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
