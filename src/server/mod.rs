pub mod config;
pub mod request_log;

use crate::{
    climate::ClimateService,
    config::Config,
    database::{DatabaseHealthChecker, DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    routes::{
        create_climate_routes, create_docs_routes, create_health_routes, create_home_routes,
    },
    shutdown::ShutdownCoordinator,
    utils::request_id_middleware,
};
use axum::{Router, middleware};
use request_log::request_response_logger;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Application state handed to every handler
#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub climate: ClimateService,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    /// Connect to the configured dataset and assemble the services
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let database: Arc<dyn DatabaseManager> =
            Arc::new(DatabaseManagerImpl::new_from_config(&config.database).await?);

        Ok(Self::with_database(config, database).await)
    }

    /// Assemble the services over an existing database manager
    pub async fn with_database(config: Config, database: Arc<dyn DatabaseManager>) -> Self {
        let health_service = Arc::new(HealthService::new());
        health_service
            .register(Arc::new(DatabaseHealthChecker::new(database.clone())))
            .await;

        Self {
            config: Arc::new(config),
            climate: ClimateService::new(database.clone()),
            database,
            health_service,
            shutdown_coordinator: Arc::new(ShutdownCoordinator::new()),
        }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid listen address: {}", e)))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to address: {}", e)))?;

        info!("Server listening on http://{}", addr);

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        let result = axum::serve(
            listener,
            self.create_app()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_coordinator.wait_for_shutdown().await;
            info!("Graceful shutdown initiated");
        })
        .await;

        if let Err(e) = result {
            error!("Server error: {}", e);
            return Err(AppError::Internal(format!("Server error: {}", e)));
        }

        info!("Server shutdown complete");
        Ok(())
    }

    /// Creates the application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            .merge(create_home_routes())
            .nest("/api/v1.0", create_climate_routes())
            .nest("/health", create_health_routes())
            .merge(create_docs_routes())
            .with_state(self.clone());

        if self.config.logging.log_request {
            app = app.layer(middleware::from_fn(request_response_logger));
        }

        // Outermost, so the request logger can see the id.
        app.layer(middleware::from_fn(request_id_middleware))
    }
}
