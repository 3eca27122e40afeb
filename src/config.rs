use crate::database::config::DatabaseConfig;
use crate::server::config::{LoggingConfig, ServerConfig};
use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "CLIMATE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load defaults, then `config.yaml` from the working directory if present,
    /// then `CLIMATE_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Config::default())?);

        if Path::new("config.yaml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Config::default())?);

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Self::environment());

        builder.build()?.try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(
            config.database.url,
            "sqlite://Resources/hawaii.sqlite?mode=ro"
        );
        assert_eq!(config.database.max_connections, 5);
        assert!(!config.database.sqlx_logging);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_request);
    }

    #[test]
    fn test_config_builder_with_env() {
        let builder = ConfigBuilder::builder()
            .add_source(ConfigBuilder::try_from(&Config::default()).unwrap())
            .add_source(Config::environment());

        let result = builder.build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_load_from_yaml_file() {
        let yaml_content = r#"
server:
  host: "0.0.0.0"
  port: 8080
database:
  url: "sqlite://data/climate.sqlite?mode=ro"
  max_connections: 2
logging:
  level: "debug"
  log_request: false
"#;

        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://data/climate.sqlite?mode=ro");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.connect_timeout_seconds, 8);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.log_request);
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let yaml_content = r#"
server:
  port: 9000
"#;

        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let config = Config::load_from_file("nonexistent.yaml").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
    }
}
