#[cfg(test)]
mod config_tests {
    use crate::config::{
        default_host, default_log_level, default_max_request_size, default_port, default_region,
        default_table_prefix, default_timeout, environment_settings, Config, ConfigError,
        DatabaseConfig, ObservabilityConfig, ServerConfig, StorageBackend,
    };
    use std::time::Duration;

    fn vars(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn database_vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn test_config() -> Config {
        Config {
            server: ServerConfig::from_settings(environment_settings(Some(vars(&[]))).unwrap())
                .unwrap(),
            database: DatabaseConfig::from_vars(database_vars(&[])).unwrap(),
            observability: ObservabilityConfig::from_settings(
                environment_settings(Some(vars(&[]))).unwrap(),
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let settings = environment_settings(Some(vars(&[]))).unwrap();
        let config = ServerConfig::from_settings(settings).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.max_request_size, 1024 * 1024);
    }

    #[test]
    fn test_server_config_from_vars() {
        let settings = environment_settings(Some(vars(&[
            ("LASERSTUDIO_HOST", "127.0.0.1"),
            ("LASERSTUDIO_PORT", "9000"),
            ("LASERSTUDIO_REQUEST_TIMEOUT_SECONDS", "5"),
            ("LASERSTUDIO_MAX_REQUEST_SIZE", "2048"),
            ("UNRELATED_PORT", "1"),
        ])))
        .unwrap();

        let config = ServerConfig::from_settings(settings).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.max_request_size, 2048);
    }

    #[test]
    fn test_database_config_defaults() {
        let config = DatabaseConfig::from_vars(database_vars(&[])).unwrap();

        assert_eq!(config.storage, StorageBackend::DynamoDb);
        assert_eq!(config.table_prefix, "laserstudio-");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_database_config_from_vars() {
        let config = DatabaseConfig::from_vars(database_vars(&[
            ("LASERSTUDIO_STORAGE", "memory"),
            ("LASERSTUDIO_TABLE_PREFIX", "almere-"),
            ("LASERSTUDIO_REGION", "eu-central-1"),
            ("LASERSTUDIO_ENDPOINT_URL", "http://localhost:8001"),
        ]))
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.storage.to_string(), "memory");
        assert_eq!(config.table_prefix, "almere-");
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8001"));
    }

    #[test]
    fn test_database_config_rejects_unknown_backend() {
        let result =
            DatabaseConfig::from_vars(database_vars(&[("LASERSTUDIO_STORAGE", "mongodb")]));
        assert!(matches!(result, Err(ConfigError::LoadError { .. })));
    }

    #[test]
    fn test_observability_config_from_vars() {
        let settings = environment_settings(Some(vars(&[
            ("LASERSTUDIO_SERVICE_NAME", "test-service"),
            ("LASERSTUDIO_SERVICE_VERSION", "1.0.0"),
            ("LASERSTUDIO_OTLP_ENDPOINT", "http://collector:4317"),
            ("LASERSTUDIO_LOG_LEVEL", "debug"),
            ("LASERSTUDIO_ENABLE_JSON_LOGGING", "true"),
        ])))
        .unwrap();

        let config = ObservabilityConfig::from_settings(settings).unwrap();
        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.service_version, "1.0.0");
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
        assert_eq!(config.log_level, "debug");
        assert!(config.enable_json_logging);
    }

    #[test]
    fn test_observability_config_defaults() {
        let settings = environment_settings(Some(vars(&[]))).unwrap();
        let config = ObservabilityConfig::from_settings(settings).unwrap();

        assert_eq!(config.service_name, "laserstudio-api");
        assert_eq!(config.otlp_endpoint, None);
        assert!(!config.enable_json_logging);
    }

    #[test]
    fn test_validation() {
        assert!(test_config().validate().is_ok());

        let mut config = test_config();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));

        let mut config = test_config();
        config.server.request_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = test_config();
        config.database.table_prefix = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Table prefix cannot be empty");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8000);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_max_request_size(), 1024 * 1024);
        assert_eq!(default_table_prefix(), "laserstudio-");
        assert_eq!(default_region(), "eu-west-1");
        assert_eq!(default_log_level(), "info");
    }

    #[tokio::test]
    async fn test_dynamodb_client_uses_region() {
        let config = DatabaseConfig::from_vars(database_vars(&[
            ("LASERSTUDIO_ENDPOINT_URL", "http://localhost:8001"),
        ]))
        .unwrap();

        let client = config.dynamodb_client().await;
        assert_eq!(
            client.config().region().map(|region| region.as_ref()),
            Some("eu-west-1")
        );
    }
}
