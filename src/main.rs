//! troupe-booking server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use troupe_booking::api;
use troupe_booking::app_state::AppState;
use troupe_booking::config::{BookingConfig, LogFormat};
use troupe_booking::identity::IdentityProvider;
use troupe_booking::persistence::{
    AppointmentRepository, MemorySeed, MemoryStore, PartyDirectory, PostgresStore,
};
use troupe_booking::service::AppointmentService;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = BookingConfig::from_env()?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting troupe-booking");

    // Build persistence layer
    let (appointments, directory): (Arc<dyn AppointmentRepository>, Arc<dyn PartyDirectory>) =
        if config.persistence_enabled {
            let store = Arc::new(PostgresStore::connect(&config).await?);
            tracing::info!(
                max_connections = config.database_max_connections,
                "connected to PostgreSQL"
            );
            (
                Arc::clone(&store) as Arc<dyn AppointmentRepository>,
                store as Arc<dyn PartyDirectory>,
            )
        } else {
            let store = Arc::new(MemoryStore::new());
            match &config.memory_seed_path {
                Some(path) => {
                    let json = tokio::fs::read_to_string(path)
                        .await
                        .with_context(|| format!("reading memory seed {}", path.display()))?;
                    let seed = MemorySeed::from_json(&json)?;
                    tracing::info!(
                        path = %path.display(),
                        troupes = seed.troupes.len(),
                        clients = seed.clients.len(),
                        troupe_leaders = seed.troupe_leaders.len(),
                        clowns = seed.clowns.len(),
                        "persistence disabled, seeding in-memory store"
                    );
                    store.load_seed(seed).await?;
                }
                None => {
                    tracing::warn!(
                        "persistence disabled and MEMORY_SEED_PATH unset, using empty in-memory store"
                    );
                }
            }
            (
                Arc::clone(&store) as Arc<dyn AppointmentRepository>,
                store as Arc<dyn PartyDirectory>,
            )
        };

    // Build service layer
    let appointment_service = Arc::new(AppointmentService::new(
        appointments,
        Arc::clone(&directory),
    ));
    let identity = Arc::new(IdentityProvider::new(config.jwt.clone(), directory));

    // Build application state
    let app_state = AppState {
        appointment_service,
        identity,
    };

    // Build router
    let app = api::with_middleware(
        api::build_router().with_state(app_state),
        Duration::from_secs(config.request_timeout_secs),
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
