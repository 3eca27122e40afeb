use crate::database::entities::measurement;
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, Func, SimpleExpr},
};
use tracing::debug;

/// A `(date, prcp)` pair from the measurement table.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct PrecipitationRow {
    pub date: String,
    pub prcp: Option<f64>,
}

/// A `(date, tobs)` pair from the measurement table.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ObservationRow {
    pub date: String,
    pub tobs: f64,
}

/// Row count for a single station.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// MIN/AVG/MAX of `tobs`. Every field is `None` when no row matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromQueryResult)]
pub struct TemperatureAggregate {
    pub min_tobs: Option<f64>,
    pub avg_tobs: Option<f64>,
    pub max_tobs: Option<f64>,
}

/// Read-only queries over the measurement table
pub struct MeasurementsDao {
    db: DatabaseConnection,
}

impl MeasurementsDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recent measurement date, or `None` when the table is empty
    pub async fn latest_date(&self) -> DatabaseResult<Option<String>> {
        #[derive(FromQueryResult)]
        struct LatestDate {
            latest: Option<String>,
        }

        let row = measurement::Entity::find()
            .select_only()
            .column_as(measurement::Column::Date.max(), "latest")
            .into_model::<LatestDate>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(row.and_then(|r| r.latest))
    }

    /// Precipitation for every row dated on or after `since`, ordered by
    /// `(date, id)`.
    pub async fn precipitation_since(&self, since: &str) -> DatabaseResult<Vec<PrecipitationRow>> {
        let rows = measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Date)
            .column(measurement::Column::Prcp)
            .filter(measurement::Column::Date.gte(since))
            .order_by_asc(measurement::Column::Date)
            .order_by_asc(measurement::Column::Id)
            .into_model::<PrecipitationRow>()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        debug!(since = %since, rows = rows.len(), "Loaded precipitation rows");
        Ok(rows)
    }

    /// Station with the most measurement rows. Ties go to the lexically
    /// smallest station id.
    pub async fn most_active_station(&self) -> DatabaseResult<Option<StationActivity>> {
        let activity = measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Station)
            .column_as(measurement::Column::Id.count(), "observations")
            .group_by(measurement::Column::Station)
            .order_by_desc(measurement::Column::Id.count())
            .order_by_asc(measurement::Column::Station)
            .into_model::<StationActivity>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        if let Some(ref activity) = activity {
            debug!(
                station = %activity.station,
                observations = activity.observations,
                "Resolved most active station"
            );
        }
        Ok(activity)
    }

    /// Temperature observations for one station dated on or after `start_date`
    pub async fn observations_for_station(
        &self,
        station: &str,
        start_date: &str,
    ) -> DatabaseResult<Vec<ObservationRow>> {
        measurement::Entity::find()
            .select_only()
            .column(measurement::Column::Date)
            .column(measurement::Column::Tobs)
            .filter(measurement::Column::Station.eq(station))
            .filter(measurement::Column::Date.gte(start_date))
            .order_by_asc(measurement::Column::Date)
            .order_by_asc(measurement::Column::Id)
            .into_model::<ObservationRow>()
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Aggregate `tobs` over `start_date <= date [<= end_date]`.
    ///
    /// Bounds are compared as plain strings. A start after the end simply
    /// matches nothing.
    pub async fn temperature_stats(
        &self,
        start_date: &str,
        end_date: Option<&str>,
    ) -> DatabaseResult<TemperatureAggregate> {
        let mut select = measurement::Entity::find()
            .select_only()
            .column_as(measurement::Column::Tobs.min(), "min_tobs")
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(measurement::Column::Tobs))),
                "avg_tobs",
            )
            .column_as(measurement::Column::Tobs.max(), "max_tobs")
            .filter(measurement::Column::Date.gte(start_date));

        if let Some(end_date) = end_date {
            select = select.filter(measurement::Column::Date.lte(end_date));
        }

        let aggregate = select
            .into_model::<TemperatureAggregate>()
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(aggregate.unwrap_or_default())
    }
}
