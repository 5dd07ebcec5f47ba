//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::application::services::{NomineeService, NomineeServiceImpl};
use crate::config::{CorsSettings, Settings, StorageBackend};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{
    InMemoryNomineeRepository, PgNomineeRepository, StorageProbe,
};
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::presentation::middleware::{create_cors_layer, create_trace_layer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub nominee_service: Arc<dyn NomineeService>,
    pub storage: Arc<dyn StorageProbe>,
}

impl AppState {
    /// Build state around a PostgreSQL nominee repository.
    pub fn postgres(repo: PgNomineeRepository) -> Self {
        let repo = Arc::new(repo);
        Self {
            nominee_service: Arc::new(NomineeServiceImpl::new(repo.clone())),
            storage: repo,
        }
    }

    /// Build state around an in-memory nominee repository.
    pub fn in_memory(repo: InMemoryNomineeRepository) -> Self {
        let repo = Arc::new(repo);
        Self {
            nominee_service: Arc::new(NomineeServiceImpl::new(repo.clone())),
            storage: repo,
        }
    }
}

/// Router with the HTTP middleware stack applied
pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(create_trace_layer())
            .layer(create_cors_layer(cors)),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let state = match settings.storage.backend {
            StorageBackend::Postgres => {
                let pool = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }

                AppState::postgres(PgNomineeRepository::new(pool))
            }
            StorageBackend::Memory => {
                if !settings.storage.accepts_writes() {
                    tracing::warn!(
                        "storage.known_applications is empty; every nominee write will return 404"
                    );
                }
                tracing::warn!(
                    known_applications = settings.storage.known_applications.len(),
                    "Using in-memory nominee storage; data is lost on shutdown"
                );
                AppState::in_memory(InMemoryNomineeRepository::with_applications(
                    settings.storage.known_applications.iter().copied(),
                ))
            }
        };

        let router = build_router(state, &settings.cors);

        // Bind to address
        let listener = TcpListener::bind(settings.server_addr()).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
