use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gestora_api::background;
use gestora_api::config::ServerConfig;
use gestora_api::router::build_app_router;
use gestora_api::state::AppState;
use gestora_events::{
    BusinessEventWatcher, CooldownRegistry, NotificationStore, NotificationStoreConfig,
    PgKeyValueStore, PgSnapshotSource, Scheduler, SnapshotSource, WatchLoop, WatcherConfig,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "gestora_api=debug,gestora_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let store_config = NotificationStoreConfig::from_env();
    let watcher_config = WatcherConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = gestora_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    gestora_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    gestora_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Notification store ---
    let (store, store_handle) = NotificationStore::spawn(store_config, Scheduler::new());
    tracing::info!("Notification store started");

    // --- Business event watcher ---
    let source: Arc<dyn SnapshotSource> = Arc::new(PgSnapshotSource::new(pool.clone()));
    let cooldowns = CooldownRegistry::new(Arc::new(PgKeyValueStore::new(pool.clone())));
    let retention_policy = watcher_config.cooldowns.clone();
    let watcher = BusinessEventWatcher::new(store.clone(), cooldowns, watcher_config);

    let cancel = CancellationToken::new();
    let watch_handle = tokio::spawn(
        WatchLoop::new(watcher, Arc::clone(&source)).run(cancel.clone()),
    );

    // --- Cooldown retention ---
    let retention_handle = tokio::spawn(background::cooldown_retention::run(
        pool.clone(),
        retention_policy,
        cancel.clone(),
    ));

    tracing::info!("Background services started (watcher, cooldown retention)");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        store: store.clone(),
        source,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    cancel.cancel();
    let _ = tokio::time::timeout(grace, watch_handle).await;
    let _ = tokio::time::timeout(grace, retention_handle).await;
    tracing::info!("Background services stopped");

    store.shutdown().await;
    let _ = tokio::time::timeout(grace, store_handle).await;
    tracing::info!("Notification store shut down");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
