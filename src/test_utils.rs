//! Fixtures for tests: an in-memory copy of the climate schema plus helpers
//! to fill it and to stand up a `Server` over it.

use crate::{
    config::Config,
    database::{
        DatabaseManager, DatabaseManagerImpl,
        entities::{measurement, station},
    },
    server::Server,
};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait, Schema,
};
use std::sync::Arc;

/// Single-connection in-memory SQLite without any tables
pub async fn memory_connection() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // Every new connection to `:memory:` is a fresh database, so keep exactly one.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite")
}

/// Create the `station` and `measurement` tables from the entity definitions
pub async fn create_schema(connection: &DatabaseConnection) {
    let schema = Schema::new(DbBackend::Sqlite);
    let backend = connection.get_database_backend();

    connection
        .execute(backend.build(&schema.create_table_from_entity(station::Entity)))
        .await
        .expect("failed to create station table");
    connection
        .execute(backend.build(&schema.create_table_from_entity(measurement::Entity)))
        .await
        .expect("failed to create measurement table");
}

pub fn station_row(station_id: &str, name: &str) -> station::ActiveModel {
    station::ActiveModel {
        id: NotSet,
        station: Set(station_id.to_string()),
        name: Set(name.to_string()),
        latitude: Set(Some(21.2716)),
        longitude: Set(Some(-157.8168)),
        elevation: Set(Some(3.0)),
    }
}

pub fn measurement_row(
    station_id: &str,
    date: &str,
    prcp: Option<f64>,
    tobs: f64,
) -> measurement::ActiveModel {
    measurement::ActiveModel {
        id: NotSet,
        station: Set(station_id.to_string()),
        date: Set(date.to_string()),
        prcp: Set(prcp),
        tobs: Set(tobs),
    }
}

/// In-memory dataset with the climate schema
pub struct TestDataset {
    pub connection: DatabaseConnection,
    pub database: Arc<dyn DatabaseManager>,
}

impl TestDataset {
    pub async fn empty() -> Self {
        let connection = memory_connection().await;
        create_schema(&connection).await;
        let database: Arc<dyn DatabaseManager> =
            Arc::new(DatabaseManagerImpl::from_connection(connection.clone()));

        Self {
            connection,
            database,
        }
    }

    pub async fn insert_stations(&self, rows: Vec<station::ActiveModel>) {
        // Insert one at a time so ids follow the given order.
        for row in rows {
            station::Entity::insert(row)
                .exec(&self.connection)
                .await
                .expect("failed to insert station");
        }
    }

    pub async fn insert_measurements(&self, rows: Vec<measurement::ActiveModel>) {
        for row in rows {
            measurement::Entity::insert(row)
                .exec(&self.connection)
                .await
                .expect("failed to insert measurement");
        }
    }

    /// Server over this dataset with request logging disabled
    pub async fn server(&self) -> Server {
        let mut config = Config::default();
        config.logging.log_request = false;

        Server::with_database(config, self.database.clone()).await
    }
}
