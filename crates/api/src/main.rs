use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roomio_api::config::ServerConfig;
use roomio_api::router::build_app_router;
use roomio_api::state::AppState;
use roomio_notifier::{DeliverySweeper, SweeperConfig, TelegramChannel, TelegramConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = roomio_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    roomio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    roomio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Delivery sweeper ---
    // Without a bot token there is nothing to push through; queued
    // notifications stay in the outbox until a sweeper picks them up.
    let sweeper_cancel = tokio_util::sync::CancellationToken::new();
    match TelegramConfig::from_env() {
        Some(telegram_config) => {
            let channel = Arc::new(TelegramChannel::new(telegram_config));
            let sweeper = DeliverySweeper::new(pool.clone(), channel, SweeperConfig::from_env());
            let cancel = sweeper_cancel.clone();
            tokio::spawn(async move {
                sweeper.run(cancel).await;
            });
            tracing::info!("Delivery sweeper started");
        }
        None => {
            tracing::warn!("TELEGRAM_BOT_TOKEN not set, delivery sweeper disabled");
        }
    }

    // --- App state / router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_cancel))
        .await
        .expect("Server error");
}

/// Resolve on Ctrl-C / SIGTERM and stop the sweeper with the server.
async fn shutdown_signal(sweeper_cancel: tokio_util::sync::CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
    sweeper_cancel.cancel();
}
