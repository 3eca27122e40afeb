use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_database_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_database_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

/// The dataset lives next to the working directory and is opened read-only.
fn default_database_url() -> String {
    "sqlite://Resources/hawaii.sqlite?mode=ro".to_string()
}

fn default_database_max_connections() -> u32 {
    5
}

fn default_database_connect_timeout_seconds() -> u64 {
    8
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_database_max_connections(),
            connect_timeout_seconds: default_database_connect_timeout_seconds(),
            sqlx_logging: false,
        }
    }
}
