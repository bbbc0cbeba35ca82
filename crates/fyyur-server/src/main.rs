use fyyur_db::AppState;
use fyyur_server::{config::ServerConfig, router};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection
    let db_config = fyyur_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = fyyur_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    fyyur_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let server_config = ServerConfig::from_env();
    let state = Arc::new(AppState { db });
    let app = router::build(state, server_config.cors_layer());

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(%addr, "server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
