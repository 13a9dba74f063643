//! soko daemon - main entry point

mod config;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oj_api::ApiState;
use oj_core::application::{Engine, EngineConfig, FlowStore, JobStore};
use oj_core::port::id_provider::UuidProvider;
use oj_core::port::time_provider::SystemTimeProvider;
use oj_process::SubprocessStepRunner;

use config::DaemonConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = DaemonConfig::load().map_err(|e| anyhow::anyhow!("configuration error: {e}"))?;

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("soko=info"))?;
    match cfg.log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("soko v{} starting...", VERSION);

    info!(catalog_path = %cfg.catalog_path, "loading catalog...");
    let flows = oj_catalog::load(&cfg.catalog_path)
        .await
        .map_err(|e| anyhow::anyhow!("catalog load failed: {e}"))?;

    let flow_store = FlowStore::new();
    for flow in flows {
        flow_store.create(flow).await.ok();
    }

    let job_store = JobStore::new();
    let id_provider = Arc::new(UuidProvider);
    let time_provider = Arc::new(SystemTimeProvider);
    let step_runner = Arc::new(SubprocessStepRunner::new());

    let engine = Arc::new(Engine::start(
        flow_store,
        job_store,
        id_provider,
        time_provider,
        step_runner,
        EngineConfig {
            queue_capacity: cfg.queue_capacity,
            executor_workers: cfg.executor_workers,
            ..Default::default()
        },
    ));

    let app = oj_api::app(ApiState {
        engine: engine.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!(addr = %cfg.bind_addr, "listening");

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = ?e, "HTTP server failed");
        }
    });

    info!("system ready, press Ctrl+C to shut down");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, exiting gracefully...");

    server.abort();
    match Arc::try_unwrap(engine) {
        Ok(engine) => engine.close(std::time::Duration::from_secs(5)).await,
        Err(_) => info!("engine still referenced elsewhere; skipping explicit close"),
    }

    info!("shutdown complete");
    Ok(())
}
