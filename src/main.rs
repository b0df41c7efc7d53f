use payment_api::config::AppConfig;
use payment_api::gateways::twocheckout::TwoCheckoutGateway;
use payment_api::service::order_service::OrderService;
use payment_api::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env()?;
    if cfg.checkout.publishable_key.is_none() {
        tracing::warn!("TCO_PUBLISHABLE_KEY is not set; the checkout page cannot tokenize cards");
    }

    let gateway = Arc::new(TwoCheckoutGateway::from_config(&cfg)?);
    let order_service = OrderService::new(
        gateway,
        cfg.order_defaults.clone(),
        Duration::from_millis(cfg.gateway_timeout_ms),
    );

    let state = AppState {
        order_service,
        checkout: cfg.checkout.clone(),
        public_dir: cfg.public_dir.clone(),
    };
    let app = payment_api::app(state);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    tracing::info!(
        addr = %cfg.bind_addr,
        sandbox = cfg.credentials.sandbox,
        "payment api listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
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
    tracing::info!("shutting down");
}
