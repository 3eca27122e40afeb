use crate::server::Server;
use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate API",
        version = "1.0.0",
        description = "Read-only precipitation and temperature queries over a station dataset"
    ),
    paths(
        crate::routes::climate::precipitation,
        crate::routes::climate::stations,
        crate::routes::climate::temperature_observations,
        crate::routes::climate::temperature_stats,
        crate::routes::climate::temperature_stats_range,
        crate::routes::health::health_check,
    ),
    components(schemas(
        crate::climate::StationSummary,
        crate::climate::TemperatureObservation,
        crate::climate::TemperatureStats,
        crate::error::ApiErrorResponse,
        crate::health::HealthResponse,
        crate::health::HealthCheckResult,
        crate::health::HealthStatus,
    )),
    tags(
        (name = "climate", description = "Precipitation, stations and temperature"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

pub fn create_docs_routes() -> Router<Server> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_climate_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1.0/precipitation",
            "/api/v1.0/stations",
            "/api/v1.0/tobs/{start_date}",
            "/api/v1.0/{start_date}",
            "/api/v1.0/{start_date}/{end_date}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
