//! Contact relay binary.

use contact_relay::{create_router, AppState, Config};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contact relay");

    let config: Config = config::Config::builder()
        .add_source(config::File::with_name("relay").required(false))
        .add_source(
            config::Environment::with_prefix("CONTACT_RELAY")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("allowed_origins"),
        )
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_else(|e| {
            // Fall back only when no config exists; parsing errors fail hard.
            let err_str = format!("{e}");
            if err_str.contains("not found") {
                warn!(error = %e, "No config file found, using defaults");
                Config::default()
            } else {
                error!(error = %e, "FATAL: Config error, fix env vars or relay.toml");
                std::process::exit(1);
            }
        });

    for secret in config.missing_secrets() {
        warn!(secret, "Secret not set, provider calls will be rejected");
    }

    info!(
        route = %config.route,
        origins = ?config.allowed_origins,
        timeout_secs = config.upstream_timeout_secs,
        "Configuration loaded"
    );

    let bind_address = config.bind_address.clone();
    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    info!(address = %bind_address, "Listening");

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Relay shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
