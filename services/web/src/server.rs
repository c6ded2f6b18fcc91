use crate::cli::ServeArgs;
use crate::infra::{AppState, SiteLinks};
use crate::routes::app_router;
use axum_prometheus::PrometheusMetricLayer;
use missionable::backend::{HostedBackend, InMemoryBackend, RemoteDataService};
use missionable::config::{AppConfig, AppEnvironment};
use missionable::error::AppError;
use missionable::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let backend: Arc<dyn RemoteDataService> = if args.offline {
        warn!(
            admin = %config.offline.admin_email,
            "serving offline; submissions are kept in memory only"
        );
        Arc::new(InMemoryBackend::with_admin(
            config.offline.admin_email.clone(),
            config.offline.admin_password.clone(),
        ))
    } else {
        Arc::new(HostedBackend::from_config(&config.backend)?)
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        backend,
        site: SiteLinks::new(config.site.base_path.clone()),
        secure_cookies: config.environment == AppEnvironment::Production,
    };

    let app = app_router(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        base_path = %config.site.base_path,
        offline = args.offline,
        "missionable site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
