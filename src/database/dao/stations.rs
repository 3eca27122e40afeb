use crate::database::entities::{StationRecord, station};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

/// Read-only queries over the station table
pub struct StationsDao {
    db: DatabaseConnection,
}

impl StationsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All stations in primary key order
    pub async fn list(&self) -> DatabaseResult<Vec<StationRecord>> {
        station::Entity::find()
            .order_by_asc(station::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        station::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{TestDataset, station_row};

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let dataset = TestDataset::empty().await;
        dataset
            .insert_stations(vec![
                station_row("USC00519397", "WAIKIKI 717.2, HI US"),
                station_row("USC00513117", "KANEOHE 838.1, HI US"),
            ])
            .await;

        let stations = dataset.database.stations().list().await.unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(ids, vec!["USC00519397", "USC00513117"]);
        assert_eq!(stations[1].name, "KANEOHE 838.1, HI US");
        assert_eq!(dataset.database.stations().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let dataset = TestDataset::empty().await;
        assert!(dataset.database.stations().list().await.unwrap().is_empty());
        assert_eq!(dataset.database.stations().count().await.unwrap(), 0);
    }
}
