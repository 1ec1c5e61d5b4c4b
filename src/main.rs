use std::sync::Arc;

use tradepanel::api::router::create_router;
use tradepanel::backend::HttpBackend;
use tradepanel::config::PanelConfig;
use tradepanel::context::PanelContext;
use tradepanel::view::ViewStore;
use tradepanel::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = PanelConfig::from_env()?;
    init_tracing(config.log_json);

    let metrics_handle = tradepanel::metrics::init_metrics()?;
    let addr = format!("{}:{}", config.host, config.port);

    let backend = HttpBackend::with_timeout(config.backend_url.clone(), config.request_timeout())?;
    tracing::info!(backend = backend.base_url(), "Using trading backend");

    let view = Arc::new(ViewStore::new());
    let context = Arc::new(PanelContext::with_store(
        Arc::new(backend),
        Arc::clone(&view),
        config.poll_interval(),
    ));
    context.start();

    let state = AppState {
        context: Arc::clone(&context),
        view,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Panel listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    context.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
