//! Database access layer with table-specific DAOs
//!
//! The climate dataset is owned outside this service. Everything here is a
//! read: each DAO call borrows one pooled connection for a single query and
//! hands it back when the query future completes or is dropped.

use std::{sync::Arc, time::Duration};

use crate::health::{HealthCheckResult, HealthChecker};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};
use thiserror::Error;
use tracing::info;

pub mod config;
pub mod dao;
pub mod entities;

pub use config::DatabaseConfig;
pub use dao::{MeasurementsDao, StationsDao};

/// Database error types
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database manager trait for dependency injection and testing
#[async_trait]
pub trait DatabaseManager: Send + Sync {
    /// Health check for database connection
    async fn health_check(&self) -> DatabaseResult<()>;

    /// Get stations DAO
    fn stations(&self) -> StationsDao;

    /// Get measurements DAO
    fn measurements(&self) -> MeasurementsDao;
}

/// Pooled connection manager
pub struct DatabaseManagerImpl {
    pub connection: DatabaseConnection,
}

impl DatabaseManagerImpl {
    /// Open a connection pool from configuration
    pub async fn new_from_config(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .sqlx_logging(config.sqlx_logging);

        let connection = sea_orm::Database::connect(options)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Connected to climate dataset"
        );

        Ok(Self { connection })
    }

    /// Wrap an already open connection
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl DatabaseManager for DatabaseManagerImpl {
    async fn health_check(&self) -> DatabaseResult<()> {
        self.connection
            .ping()
            .await
            .map_err(|e| DatabaseError::Database(format!("db error: {}", e)))
    }

    fn stations(&self) -> StationsDao {
        StationsDao::new(self.connection.clone())
    }

    fn measurements(&self) -> MeasurementsDao {
        MeasurementsDao::new(self.connection.clone())
    }
}

/// Health probe over any `DatabaseManager`: a ping plus a station count
pub struct DatabaseHealthChecker {
    database: Arc<dyn DatabaseManager>,
}

impl DatabaseHealthChecker {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl HealthChecker for DatabaseHealthChecker {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthCheckResult {
        if let Err(err) = self.database.health_check().await {
            return HealthCheckResult::unhealthy_with_details(
                "DB health check failed".to_string(),
                serde_json::json!({
                    "status": "unhealthy",
                    "error": err.to_string(),
                }),
            );
        }

        match self.database.stations().count().await {
            Ok(stations) => HealthCheckResult::healthy_with_details(serde_json::json!({
                "status": "healthy",
                "connection": "ok",
                "stations": stations,
            })),
            Err(err) => HealthCheckResult::degraded_with_details(
                "Station table is not readable".to_string(),
                serde_json::json!({
                    "status": "degraded",
                    "connection": "ok",
                    "error": err.to_string(),
                }),
            ),
        }
    }
}
