use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryOrderRepository, LoggingNotificationPublisher};
use crate::routes::with_order_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jewel_quote::config::AppConfig;
use jewel_quote::error::AppError;
use jewel_quote::orders::OrderService;
use jewel_quote::telemetry;
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

    let repository = Arc::new(InMemoryOrderRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let order_service = Arc::new(OrderService::new(
        repository,
        notifications,
        config.studio.notification_email.clone(),
    ));

    let app = with_order_routes(order_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "custom jewelry quoting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
