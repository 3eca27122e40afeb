use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl HealthCheckResult {
    fn new(status: HealthStatus, message: Option<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            status,
            message,
            details,
            duration_ms: None,
        }
    }

    pub fn healthy_with_details(details: serde_json::Value) -> Self {
        Self::new(HealthStatus::Healthy, None, Some(details))
    }

    pub fn degraded_with_details(message: String, details: serde_json::Value) -> Self {
        Self::new(HealthStatus::Degraded, Some(message), Some(details))
    }

    pub fn unhealthy_with_details(message: String, details: serde_json::Value) -> Self {
        Self::new(HealthStatus::Unhealthy, Some(message), Some(details))
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

#[async_trait]
pub trait HealthChecker: Send + Sync {
    /// Name used to select this check via `?check=<name>`
    fn name(&self) -> &str;

    async fn check(&self) -> HealthCheckResult;
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    pub checks: BTreeMap<String, HealthCheckResult>,
    pub total_duration_ms: u64,
}

/// Registry of component health checks.
///
/// Without a filter only liveness is reported. `all` runs every registered
/// check; any other filter runs the check with that name. The overall status
/// is the worst individual status.
#[derive(Default)]
pub struct HealthService {
    checkers: RwLock<BTreeMap<String, Arc<dyn HealthChecker>>>,
}

impl HealthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, checker: Arc<dyn HealthChecker>) {
        let name = checker.name().to_string();
        self.checkers.write().await.insert(name, checker);
    }

    pub async fn registered(&self) -> Vec<String> {
        self.checkers.read().await.keys().cloned().collect()
    }

    pub async fn check_health(&self, filter: Option<&str>) -> HealthResponse {
        let checkers = self.checkers.read().await;
        let mut checks = BTreeMap::new();
        let mut total_duration_ms = 0u64;

        let selected = checkers.iter().filter(|(name, _)| match filter {
            Some("all") => true,
            Some(specific) => name.as_str() == specific,
            None => false,
        });

        for (name, checker) in selected {
            let start = Instant::now();
            let result = checker.check().await;
            let duration_ms = start.elapsed().as_millis() as u64;
            total_duration_ms += duration_ms;
            checks.insert(name.clone(), result.with_duration(duration_ms));
        }

        let status = checks
            .values()
            .map(|result| result.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        HealthResponse {
            status,
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            checks,
            total_duration_ms,
        }
    }
}
