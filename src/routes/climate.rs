use crate::{
    climate::{PrecipitationByDate, StationSummary, TemperatureObservation, TemperatureStats},
    error::{AppError, ApiErrorResponse},
    server::Server,
};
use axum::{
    Router,
    extract::{Path, State},
    response::Json,
    routing::get,
};
use std::collections::BTreeMap;

/// Climate API routes, nested under `/api/v1.0`
pub fn create_climate_routes() -> Router<Server> {
    Router::new()
        .route("/precipitation", get(precipitation))
        .route("/stations", get(stations))
        .route("/tobs/{start_date}", get(temperature_observations))
        .route("/{start_date}", get(temperature_stats))
        .route("/{start_date}/{end_date}", get(temperature_stats_range))
}

/// Precipitation for the last 365 days of the dataset
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = 200, description = "Date to precipitation", body = BTreeMap<String, Option<f64>>),
        (status = 500, description = "Database error", body = ApiErrorResponse),
        (status = 503, description = "Dataset has no measurements", body = ApiErrorResponse),
    ),
    tag = "climate"
)]
pub async fn precipitation(
    State(server): State<Server>,
) -> Result<Json<PrecipitationByDate>, AppError> {
    Ok(Json(server.climate.precipitation_last_year().await?))
}

/// All weather stations
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = 200, description = "Stations", body = [StationSummary]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "climate"
)]
pub async fn stations(State(server): State<Server>) -> Result<Json<Vec<StationSummary>>, AppError> {
    Ok(Json(server.climate.stations().await?))
}

/// Temperature observations of the most active station from `start_date` on
#[utoipa::path(
    get,
    path = "/api/v1.0/tobs/{start_date}",
    params(("start_date" = String, Path, description = "Inclusive lower bound, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Observations", body = [TemperatureObservation]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
        (status = 503, description = "Dataset has no measurements", body = ApiErrorResponse),
    ),
    tag = "climate"
)]
pub async fn temperature_observations(
    State(server): State<Server>,
    Path(start_date): Path<String>,
) -> Result<Json<Vec<TemperatureObservation>>, AppError> {
    Ok(Json(
        server.climate.temperature_observations(&start_date).await?,
    ))
}

/// Minimum, average and maximum temperature from `start_date` on
#[utoipa::path(
    get,
    path = "/api/v1.0/{start_date}",
    params(("start_date" = String, Path, description = "Inclusive lower bound, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Temperature statistics", body = TemperatureStats),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "climate"
)]
pub async fn temperature_stats(
    State(server): State<Server>,
    Path(start_date): Path<String>,
) -> Result<Json<TemperatureStats>, AppError> {
    Ok(Json(server.climate.temperature_stats(&start_date).await?))
}

/// Minimum, average and maximum temperature between two dates, inclusive
#[utoipa::path(
    get,
    path = "/api/v1.0/{start_date}/{end_date}",
    params(
        ("start_date" = String, Path, description = "Inclusive lower bound, YYYY-MM-DD"),
        ("end_date" = String, Path, description = "Inclusive upper bound, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Temperature statistics", body = TemperatureStats),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "climate"
)]
pub async fn temperature_stats_range(
    State(server): State<Server>,
    Path((start_date, end_date)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, AppError> {
    Ok(Json(
        server
            .climate
            .temperature_stats_range(&start_date, &end_date)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestDataset, measurement_row};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn climate_app(dataset: &TestDataset) -> Router {
        let server = dataset.server().await;
        create_climate_routes().with_state(server)
    }

    #[tokio::test]
    async fn test_static_segments_win_over_dates() {
        let dataset = TestDataset::empty().await;
        dataset
            .insert_measurements(vec![measurement_row("USC1", "2017-01-01", Some(0.2), 70.0)])
            .await;
        let app = climate_app(&dataset).await;

        let (status, body) = get_json(app.clone(), "/precipitation").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"2017-01-01": 0.2}));

        let (status, body) = get_json(app.clone(), "/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = get_json(app, "/tobs/2016-01-01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"Date": "2017-01-01", "Temperature": 70.0}]));
    }

    #[tokio::test]
    async fn test_unvalidated_dates_are_accepted() {
        let dataset = TestDataset::empty().await;
        dataset
            .insert_measurements(vec![measurement_row("USC1", "2017-01-01", None, 70.0)])
            .await;
        let app = climate_app(&dataset).await;

        // "not-a-date" sorts after every ISO date, so nothing matches.
        let (status, body) = get_json(app, "/not-a-date").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Minimum Temperature"], Value::Null);
        assert_eq!(body["Average Temperature"], Value::Null);
        assert_eq!(body["Maximum Temperature"], Value::Null);
    }

    #[tokio::test]
    async fn test_empty_dataset_is_service_unavailable() {
        let dataset = TestDataset::empty().await;
        let app = climate_app(&dataset).await;

        let (status, body) = get_json(app.clone(), "/precipitation").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "Dataset is empty");

        let (status, _) = get_json(app, "/tobs/2017-01-01").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
