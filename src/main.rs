//! Server entry point: loads configuration, wires adapters, serves the API.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use deepfake_shield::adapters::detection::{
    DemoDetector, FallbackDetector, ResembleConfig, ResembleDetector, SightengineConfig,
    SightengineDetector,
};
use deepfake_shield::adapters::history::{
    InMemoryHistoryRepository, SupabaseConfig, SupabaseHistoryRepository, DEFAULT_PER_USER_LIMIT,
};
use deepfake_shield::adapters::http::{app_router, AnalysisAppState};
use deepfake_shield::adapters::storage::LocalUploadStorage;
use deepfake_shield::config::{AppConfig, DetectionConfig, HistoryConfig};
use deepfake_shield::ports::HistoryRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let detector = Arc::new(build_detector(&config.detection));
    let storage = Arc::new(LocalUploadStorage::new(config.storage.upload_dir.clone()));
    let history = build_history(&config.history);

    if config.detection.demo_mode() {
        tracing::warn!("No detection vendor configured; all results will use demo scores");
    }
    tracing::info!(
        sightengine = config.detection.has_sightengine(),
        resemble = config.detection.has_resemble(),
        history = history.backend_name(),
        upload_dir = %config.storage.upload_dir.display(),
        "Detection services configured"
    );

    let state = AnalysisAppState::new(
        detector,
        storage,
        history,
        &config.detection,
        &config.storage,
    );
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Deepfake Shield listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over config.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let result = if config.is_production() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).pretty().try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing init failed: {}", e);
    }
}

fn build_detector(config: &DetectionConfig) -> FallbackDetector {
    let mut detector = FallbackDetector::new(Arc::new(DemoDetector::new()))
        .with_deadline(config.vendor_deadline());

    if let (Some(user), Some(secret)) = (
        config.sightengine_api_user.as_deref().filter(|_| config.has_sightengine()),
        config.sightengine_api_secret.as_deref(),
    ) {
        let sightengine = SightengineConfig::new(user, secret)
            .with_base_url(config.sightengine_base_url.clone())
            .with_image_models(config.image_models.clone())
            .with_video_models(config.video_models.clone())
            .with_image_timeout(config.image_timeout())
            .with_video_timeout(config.video_timeout());
        detector = detector.with_vendor(Arc::new(SightengineDetector::new(sightengine)));
    }

    if let Some(key) = config.resemble_api_key.as_deref().filter(|_| config.has_resemble()) {
        let resemble = ResembleConfig::new(key)
            .with_base_url(config.resemble_base_url.clone())
            .with_timeout(config.audio_timeout());
        detector = detector.with_vendor(Arc::new(ResembleDetector::new(resemble)));
    }

    detector
}

fn build_history(config: &HistoryConfig) -> Arc<dyn HistoryRepository> {
    match (
        config.supabase_url.as_deref().filter(|_| config.has_supabase()),
        config.supabase_service_key.as_deref(),
    ) {
        (Some(url), Some(key)) => Arc::new(SupabaseHistoryRepository::new(
            SupabaseConfig::new(url, key)
                .with_table(config.table.clone())
                .with_timeout(config.timeout()),
        )),
        _ => {
            tracing::info!(
                max_entries = config.memory_max_entries,
                "Supabase not configured; keeping history in memory"
            );
            Arc::new(InMemoryHistoryRepository::with_limits(
                DEFAULT_PER_USER_LIMIT,
                config.memory_max_entries,
            ))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
