use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Days, NaiveDate};
use climate_api::test_utils::{TestDataset, measurement_row, station_row};
use serde_json::Value;
use tower::ServiceExt;

/// Test harness: an in-memory dataset plus the full application router
pub struct TestHarness {
    pub dataset: TestDataset,
    pub app: Router,
}

impl TestHarness {
    pub async fn new() -> Self {
        let dataset = TestDataset::empty().await;
        let app = dataset.server().await.create_app();
        Self { dataset, app }
    }

    /// Two stations: USC1 reports every day of 2017, USC2 reports once
    #[allow(dead_code)]
    pub async fn with_two_stations() -> Self {
        let harness = Self::new().await;
        harness
            .dataset
            .insert_stations(vec![
                station_row("USC1", "HONOLULU OBSERVATORY, HI US"),
                station_row("USC2", "MANOA LYON ARBO, HI US"),
            ])
            .await;

        let mut rows = Vec::new();
        for (offset, date) in daily_dates("2017-01-01", "2017-12-31").into_iter().enumerate() {
            let prcp = if offset % 10 == 0 { None } else { Some(offset as f64 / 100.0) };
            rows.push(measurement_row("USC1", &date, prcp, 60.0 + (offset % 20) as f64));
        }
        rows.push(measurement_row("USC2", "2017-07-04", Some(2.5), 90.0));
        harness.dataset.insert_measurements(rows).await;

        harness
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::String(
                String::from_utf8_lossy(&body).into_owned(),
            ))
        };
        (status, value)
    }
}

/// Every ISO date from `start` to `end`, inclusive
pub fn daily_dates(start: &str, end: &str) -> Vec<String> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    let end = NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap();
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current.format("%Y-%m-%d").to_string());
        current = current.checked_add_days(Days::new(1)).unwrap();
    }
    dates
}
