use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use centro_api::config::{Config, LISTEN_ADDR};
use centro_api::db::{self, ReadinessPolicy};
use centro_api::router::{AppState, centro_router};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.redacted_url(),
        loglevel = %cfg.loglevel,
        listen = LISTEN_ADDR
    );

    let (pool, dialect) = db::connect_lazy(&cfg.database_url()?)?;

    db::wait_for_database(&pool, &cfg, ReadinessPolicy::default()).await?;

    // A missing table surfaces per request; keep serving.
    if let Err(e) = db::init_schema(&pool, dialect).await {
        error!(error = %e, "failed to initialize database schema");
    }

    let app = centro_router(AppState::new(pool.clone(), dialect));

    let listener = TcpListener::bind(LISTEN_ADDR).await?;
    info!("HTTP server listening on http://{}", LISTEN_ADDR);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
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
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
