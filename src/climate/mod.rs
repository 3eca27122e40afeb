//! Climate queries served by the HTTP API
//!
//! Dates are ISO `YYYY-MM-DD` strings and are compared as strings, so caller
//! supplied bounds are never validated. A malformed bound simply matches
//! whatever sorts after (or before) it.

pub mod types;

use crate::database::dao::TemperatureAggregate;
use crate::database::{DatabaseError, DatabaseManager, DatabaseResult};
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::debug;

pub use types::{PrecipitationByDate, StationSummary, TemperatureObservation, TemperatureStats};

/// Fixed lookback used by the precipitation report, in calendar days
pub const PRECIPITATION_LOOKBACK_DAYS: u64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct ClimateService {
    database: Arc<dyn DatabaseManager>,
}

impl ClimateService {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }

    /// Precipitation for the year leading up to the latest stored date.
    ///
    /// Rows arrive ordered by `(date, id)` and later rows overwrite earlier
    /// ones, so the highest id wins when several stations share a date.
    pub async fn precipitation_last_year(&self) -> DatabaseResult<PrecipitationByDate> {
        let measurements = self.database.measurements();
        let latest = measurements.latest_date().await?.ok_or_else(|| {
            DatabaseError::EmptyDataset("no measurements to derive the latest date".to_string())
        })?;
        let since = lookback_start(&latest)?;
        debug!(latest = %latest, since = %since, "Computed precipitation window");

        let rows = measurements.precipitation_since(&since).await?;
        Ok(rows.into_iter().map(|row| (row.date, row.prcp)).collect())
    }

    pub async fn stations(&self) -> DatabaseResult<Vec<StationSummary>> {
        let stations = self.database.stations().list().await?;
        Ok(stations
            .into_iter()
            .map(|station| StationSummary {
                station_id: station.station,
                station_name: station.name,
            })
            .collect())
    }

    /// Observations of the most active station dated on or after `start_date`
    pub async fn temperature_observations(
        &self,
        start_date: &str,
    ) -> DatabaseResult<Vec<TemperatureObservation>> {
        let measurements = self.database.measurements();
        let most_active = measurements.most_active_station().await?.ok_or_else(|| {
            DatabaseError::EmptyDataset("no measurements to rank stations by".to_string())
        })?;

        let rows = measurements
            .observations_for_station(&most_active.station, start_date)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| TemperatureObservation {
                date: row.date,
                temperature: row.tobs,
            })
            .collect())
    }

    pub async fn temperature_stats(&self, start_date: &str) -> DatabaseResult<TemperatureStats> {
        let aggregate = self
            .database
            .measurements()
            .temperature_stats(start_date, None)
            .await?;
        Ok(aggregate.into())
    }

    /// Inclusive on both ends. `start_date > end_date` is not swapped.
    pub async fn temperature_stats_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> DatabaseResult<TemperatureStats> {
        let aggregate = self
            .database
            .measurements()
            .temperature_stats(start_date, Some(end_date))
            .await?;
        Ok(aggregate.into())
    }
}

impl From<TemperatureAggregate> for TemperatureStats {
    fn from(aggregate: TemperatureAggregate) -> Self {
        Self {
            minimum: aggregate.min_tobs,
            average: aggregate.avg_tobs,
            maximum: aggregate.max_tobs,
        }
    }
}

/// `latest` minus the fixed lookback, formatted as an ISO date
pub fn lookback_start(latest: &str) -> DatabaseResult<String> {
    let latest_date = NaiveDate::parse_from_str(latest, DATE_FORMAT).map_err(|e| {
        DatabaseError::InvalidData(format!("latest date '{}' is not ISO: {}", latest, e))
    })?;

    latest_date
        .checked_sub_days(Days::new(PRECIPITATION_LOOKBACK_DAYS))
        .map(|date| date.format(DATE_FORMAT).to_string())
        .ok_or_else(|| DatabaseError::InvalidData(format!("latest date '{}' out of range", latest)))
}
