use crate::cli::ServeArgs;
use crate::infra::{load_case, AppState, ConfiguredDraftStore, LoggingTransport};
use crate::routes::with_review_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use case_review::config::AppConfig;
use case_review::error::AppError;
use case_review::review::{ReviewService, ScoringConfig};
use case_review::telemetry;
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

    let case = load_case(&config.review)?;
    let drafts = ConfiguredDraftStore::from_config(&config.review);
    info!(room_id = %case.room_id, drafts = %drafts.describe(), "review case loaded");

    let review_service = Arc::new(ReviewService::new(
        case,
        Arc::new(drafts),
        Arc::new(LoggingTransport),
        ScoringConfig::default(),
    ));

    let app = with_review_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "case review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
