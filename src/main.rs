use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use uniswap_v2_estimator::config::Config;
use uniswap_v2_estimator::{AppState, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_yaml("config/default.yaml").await?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_log_filter().into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(!config.is_production())
        .with_line_number(!config.is_production());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("debug logging enabled");

    tracing::info!(
        environment = %config.app.environment,
        version = %config.app.version,
        timeout_secs = config.rpc.request_timeout_secs,
        "configuration loaded"
    );

    let cancellation_token = CancellationToken::new();
    let addr = config.server_uri();

    let app = build_app(AppState::from_config(&config)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind TCP listener on {addr}"))?;

    tracing::info!("listening on http://{addr}");
    tracing::info!("estimate endpoint: http://{addr}/estimate");

    tokio::spawn(shutdown_signal(cancellation_token.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await
        .context("failed to start server")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal(cancellation_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections...");
    cancellation_token.cancel();
}
