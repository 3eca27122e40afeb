use crate::{
    health::{HealthResponse, HealthStatus},
    server::Server,
};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HealthCheckQuery {
    /// `all`, or the name of a single check such as `database`
    #[serde(default)]
    pub check: Option<String>,
}

pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

/// Service health. Unhealthy components turn the status code into 503.
#[utoipa::path(
    get,
    path = "/health",
    params(HealthCheckQuery),
    responses(
        (status = 200, description = "Healthy or degraded", body = HealthResponse),
        (status = 503, description = "At least one check is unhealthy", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> (StatusCode, Json<HealthResponse>) {
    let response = server
        .health_service
        .check_health(params.check.as_deref())
        .await;

    let status = match response.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };

    (status, Json(response))
}
